//! Exchange rate types and logic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gst_invoice_shared::types::Currency;

use super::conversion::convert_amount;
use crate::error::InvoiceError;

/// Rate applied uniformly to every line item of one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxRate {
    /// Currency the invoice amounts are stated in.
    pub foreign_currency: Currency,
    /// Local currency units per one unit of `foreign_currency`.
    pub rate: Decimal,
    /// Invoice date the rate was taken for.
    pub as_of: NaiveDate,
}

impl FxRate {
    /// Creates a validated exchange rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExchangeRate` when `rate <= 0`.
    pub fn new(
        foreign_currency: Currency,
        rate: Decimal,
        as_of: NaiveDate,
    ) -> Result<Self, InvoiceError> {
        if rate <= Decimal::ZERO {
            return Err(InvoiceError::InvalidExchangeRate(rate));
        }
        Ok(Self {
            foreign_currency,
            rate,
            as_of,
        })
    }

    /// Converts a foreign amount into local currency at this rate.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` for amounts below zero.
    pub fn convert(&self, amount_foreign: Decimal) -> Result<Decimal, InvoiceError> {
        convert_amount(amount_foreign, self.rate)
    }
}
