//! Invoice-level totals.
//!
//! Foreign amounts are summed first and converted once, so per-line
//! rounding never compounds into the displayed total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax::TaxPolicy;
use super::types::LineItem;
use crate::currency::{convert_amount, round_for_display};
use crate::error::InvoiceError;
use crate::words::amount_in_words;

/// Derived totals of one invoice. Never stored independently of its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line amounts in the foreign currency.
    pub subtotal_foreign: Decimal,
    /// `subtotal_foreign × fx_rate`.
    pub subtotal_local: Decimal,
    /// Tax from the invoice's policy, in local currency.
    pub tax_local: Decimal,
    /// `subtotal_local + tax_local`.
    pub total_local: Decimal,
}

impl InvoiceTotals {
    /// Copy with every figure rounded to 2 decimal places for display.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            subtotal_foreign: round_for_display(self.subtotal_foreign),
            subtotal_local: round_for_display(self.subtotal_local),
            tax_local: round_for_display(self.tax_local),
            total_local: round_for_display(self.total_local),
        }
    }

    /// Words for the total rounded to a whole local unit.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeForWords` when the total is 10^15 or more.
    pub fn amount_in_words(&self) -> Result<String, InvoiceError> {
        amount_in_words(self.total_local)
    }
}

/// Aggregates line items into invoice totals.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use gst_invoice_core::invoice::{LineItem, TaxPolicy, compute_totals};
///
/// let items = vec![
///     LineItem::fixed("Design", "998314", dec!(50)).unwrap(),
///     LineItem::fixed("Build", "998314", dec!(50)).unwrap(),
/// ];
/// let totals = compute_totals(&items, dec!(80), &TaxPolicy::ZeroRated).unwrap();
/// assert_eq!(totals.total_local, dec!(8000));
/// ```
///
/// # Errors
///
/// Returns `EmptyLineItems` for an empty list, a negative-value error for
/// any invalid line, `InvalidExchangeRate` when `fx_rate <= 0`,
/// `InvalidTaxRate` for an out-of-range policy and `AmountOverflow` when a
/// sum or product leaves the decimal range.
pub fn compute_totals(
    items: &[LineItem],
    fx_rate: Decimal,
    tax_policy: &TaxPolicy,
) -> Result<InvoiceTotals, InvoiceError> {
    if items.is_empty() {
        return Err(InvoiceError::EmptyLineItems);
    }

    let mut subtotal_foreign = Decimal::ZERO;
    for item in items {
        item.validate()?;
        subtotal_foreign = subtotal_foreign
            .checked_add(item.amount)
            .ok_or(InvoiceError::AmountOverflow)?;
    }

    let subtotal_local = convert_amount(subtotal_foreign, fx_rate)?;
    let tax_local = tax_policy.apply(subtotal_local)?;
    let total_local = subtotal_local
        .checked_add(tax_local)
        .ok_or(InvoiceError::AmountOverflow)?;

    Ok(InvoiceTotals {
        subtotal_foreign,
        subtotal_local,
        tax_local,
        total_local,
    })
}
