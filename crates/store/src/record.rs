//! Persisted invoice records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gst_invoice_core::InvoiceError;
use gst_invoice_core::invoice::{Invoice, InvoiceTotals};
use gst_invoice_shared::types::{InvoiceId, UserId};

/// A saved invoice together with the figures derived from it.
///
/// `totals` and `amount_in_words` are recomputed whenever the invoice
/// changes and are never edited on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Record identifier.
    pub id: InvoiceId,
    /// Owner of the record.
    pub user_id: UserId,
    /// The invoice as entered.
    pub invoice: Invoice,
    /// Full-precision totals.
    pub totals: InvoiceTotals,
    /// Rounded total in words.
    pub amount_in_words: String,
    /// When the record was first saved.
    pub created_at: DateTime<Utc>,
    /// When the record was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl InvoiceRecord {
    /// Builds a new record, computing totals from the invoice.
    ///
    /// # Errors
    ///
    /// Returns the invoice's validation or computation error.
    pub fn new(user_id: UserId, invoice: Invoice) -> Result<Self, InvoiceError> {
        let computed = invoice.compute()?;
        let now = Utc::now();
        Ok(Self {
            id: InvoiceId::new(),
            user_id,
            invoice,
            totals: computed.totals,
            amount_in_words: computed.amount_in_words,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the invoice, keeping `id`, owner and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns the new invoice's validation or computation error; the record
    /// is unchanged in that case.
    pub fn replace(&mut self, invoice: Invoice) -> Result<(), InvoiceError> {
        let computed = invoice.compute()?;
        self.invoice = invoice;
        self.totals = computed.totals;
        self.amount_in_words = computed.amount_in_words;
        self.updated_at = Utc::now().max(self.created_at);
        Ok(())
    }

    /// Re-derives `totals` and `amount_in_words` from the stored invoice,
    /// leaving timestamps alone.
    ///
    /// # Errors
    ///
    /// Returns the invoice's validation or computation error.
    pub fn recompute(&mut self) -> Result<(), InvoiceError> {
        let computed = self.invoice.compute()?;
        self.totals = computed.totals;
        self.amount_in_words = computed.amount_in_words;
        Ok(())
    }

    /// Whether `user_id` owns this record.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gst_invoice_shared::InvoiceDefaults;
    use rust_decimal_macros::dec;

    fn invoice() -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let mut invoice = Invoice::sample_rcm(&InvoiceDefaults::default(), date);
        invoice.fx_rate = dec!(83.10);
        invoice
    }

    #[test]
    fn test_new_record_carries_computed_figures() {
        let record = InvoiceRecord::new(UserId::new("user-1").unwrap(), invoice()).unwrap();
        assert_eq!(record.totals.total_local, dec!(8736.9678));
        assert_eq!(
            record.amount_in_words,
            "Eight Thousand Seven Hundred and Thirty Seven"
        );
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_replace_recomputes_and_keeps_identity() {
        let mut record = InvoiceRecord::new(UserId::new("user-1").unwrap(), invoice()).unwrap();
        let id = record.id;
        let created_at = record.created_at;

        let mut changed = invoice();
        changed.tax_policy = gst_invoice_core::invoice::TaxPolicy::ZeroRated;
        record.replace(changed).unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.created_at, created_at);
        assert!(record.updated_at >= created_at);
        assert_eq!(record.totals.tax_local, dec!(0));
        assert_eq!(record.amount_in_words, "Seven Thousand Four Hundred and Four");
    }

    #[test]
    fn test_failed_replace_leaves_record_untouched() {
        let mut record = InvoiceRecord::new(UserId::new("user-1").unwrap(), invoice()).unwrap();
        let before = record.clone();

        let mut broken = invoice();
        broken.items.clear();
        assert_eq!(record.replace(broken), Err(InvoiceError::EmptyLineItems));
        assert_eq!(record, before);
    }

    #[test]
    fn test_recompute_restores_derived_figures() {
        let mut record = InvoiceRecord::new(UserId::new("user-1").unwrap(), invoice()).unwrap();
        let expected = record.clone();
        record.totals.total_local = dec!(1);
        record.amount_in_words = "One".to_string();

        record.recompute().unwrap();
        assert_eq!(record, expected);
    }

    #[test]
    fn test_ownership() {
        let record = InvoiceRecord::new(UserId::new("user-1").unwrap(), invoice()).unwrap();
        assert!(record.is_owned_by(&UserId::new("user-1").unwrap()));
        assert!(!record.is_owned_by(&UserId::new("user-2").unwrap()));
    }
}
