//! Export and RCM invoices: line items, tax policy, totals and layout.
//!
//! Both variants share the same computation. The variant only picks the
//! default tax policy and the printed wording.

pub mod document;
pub mod render;
pub mod tax;
pub mod totals;
pub mod types;

#[cfg(test)]
mod props;

pub use document::{ComputedInvoice, Invoice, InvoiceKind};
pub use render::{InvoiceLayout, format_local, render_invoice};
pub use tax::TaxPolicy;
pub use totals::{InvoiceTotals, compute_totals};
pub use types::{LineItem, LineItemInput, Recipient, Supplier};
