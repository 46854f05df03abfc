//! Core invoice computation for GST export and RCM self-invoices.
//!
//! This crate contains pure computation with ZERO web or storage dependencies.
//! All monetary values are `rust_decimal::Decimal`.
//!
//! # Modules
//!
//! - `words` - Amount in words using Indian grouping (crore, lakh, thousand)
//! - `currency` - Foreign to local conversion and display rounding
//! - `invoice` - Line items, tax policies, totals and the printable layout

pub mod currency;
pub mod error;
pub mod invoice;
pub mod words;

pub use error::{ErrorKind, InvoiceError};
