//! Persistence for invoice records and drafts.
//!
//! Records are scoped to a user and kept in memory, optionally mirrored to a
//! JSON file after every mutation. Drafts are single invoices saved between
//! sessions.

pub mod draft;
pub mod error;
pub mod record;
pub mod repository;

pub use draft::DraftStore;
pub use error::StoreError;
pub use record::InvoiceRecord;
pub use repository::InvoiceRepository;
