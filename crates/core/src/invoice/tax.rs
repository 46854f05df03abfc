//! Tax policies applied to the local-currency subtotal.
//!
//! The policy is a value carried by each invoice, so totals code never
//! branches on the invoice variant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvoiceError;

/// How tax is derived from the local-currency subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaxPolicy {
    /// No tax charged (export of services under LUT).
    ZeroRated,
    /// Tax is a fraction of the local subtotal (e.g. IGST 18% under RCM).
    PercentOfLocal {
        /// Fraction in `[0, 1]`, 0.18 for 18%.
        rate: Decimal,
    },
}

impl TaxPolicy {
    /// Creates a percentage policy, validating the rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxRate` when `rate` is outside `[0, 1]`.
    pub fn percent_of_local(rate: Decimal) -> Result<Self, InvoiceError> {
        let policy = Self::PercentOfLocal { rate };
        policy.validate()?;
        Ok(policy)
    }

    /// Validates the policy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxRate` when a percentage is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        match *self {
            Self::ZeroRated => Ok(()),
            Self::PercentOfLocal { rate } => {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(InvoiceError::InvalidTaxRate(rate));
                }
                Ok(())
            }
        }
    }

    /// Fraction of the subtotal charged as tax.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        match *self {
            Self::ZeroRated => Decimal::ZERO,
            Self::PercentOfLocal { rate } => rate,
        }
    }

    /// Tax owed on `subtotal_local`, at full precision.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxRate` for an out-of-range percentage and
    /// `AmountOverflow` when the tax leaves the decimal range.
    pub fn apply(&self, subtotal_local: Decimal) -> Result<Decimal, InvoiceError> {
        self.validate()?;
        subtotal_local
            .checked_mul(self.rate())
            .ok_or(InvoiceError::AmountOverflow)
    }

    /// Rate as a printable percentage, e.g. `18` for 0.18.
    #[must_use]
    pub fn percent(&self) -> Decimal {
        self.rate()
            .checked_mul(Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::MAX)
            .normalize()
    }
}
