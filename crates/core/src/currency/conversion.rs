//! Currency conversion logic.
//!
//! CRITICAL: Conversion keeps full decimal precision.
//! - Round to 2 decimal places only when displaying
//! - Round to a whole unit only when rendering words
//! - Both use midpoint-away-from-zero, matching printed invoices

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::error::InvoiceError;

/// Decimal places shown for monetary amounts.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Converts a foreign-currency amount into local currency.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use gst_invoice_core::currency::convert_amount;
///
/// assert_eq!(convert_amount(dec!(100), dec!(86.5)).unwrap(), dec!(8650.0));
/// ```
///
/// # Errors
///
/// Returns `InvalidExchangeRate` when `fx_rate <= 0`, `NegativeAmount`
/// when the amount is below zero and `AmountOverflow` when the product
/// leaves the decimal range.
pub fn convert_amount(amount_foreign: Decimal, fx_rate: Decimal) -> Result<Decimal, InvoiceError> {
    if fx_rate <= Decimal::ZERO {
        return Err(InvoiceError::InvalidExchangeRate(fx_rate));
    }
    if amount_foreign < Decimal::ZERO {
        return Err(InvoiceError::NegativeAmount(amount_foreign));
    }
    amount_foreign
        .checked_mul(fx_rate)
        .ok_or(InvoiceError::AmountOverflow)
}

/// Rounds to 2 decimal places for display. The result always carries
/// exactly 2 places, so `8000` prints as `8000.00`.
#[must_use]
pub fn round_for_display(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMAL_PLACES);
    rounded
}

/// Rounds to the nearest whole unit.
#[must_use]
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_amount() {
        // 100 USD * 86.5 = 8650 INR
        let result = convert_amount(dec!(100), dec!(86.5)).unwrap();
        assert_eq!(result, dec!(8650.00));
    }

    #[test]
    fn test_convert_keeps_full_precision() {
        // 2992.50 USD * 86.50 = 258851.2500 INR
        let result = convert_amount(dec!(2992.50), dec!(86.50)).unwrap();
        assert_eq!(result, dec!(258851.25));

        let result = convert_amount(dec!(0.333), dec!(83.1234)).unwrap();
        assert_eq!(result, dec!(27.6800922));
    }

    #[test]
    fn test_convert_zero_amount() {
        assert_eq!(convert_amount(Decimal::ZERO, dec!(83.10)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_convert_rejects_non_positive_rate() {
        assert_eq!(
            convert_amount(dec!(100), Decimal::ZERO),
            Err(InvoiceError::InvalidExchangeRate(Decimal::ZERO))
        );
        assert_eq!(
            convert_amount(dec!(100), dec!(-5)),
            Err(InvoiceError::InvalidExchangeRate(dec!(-5)))
        );
    }

    #[test]
    fn test_convert_rejects_negative_amount() {
        assert_eq!(
            convert_amount(dec!(-1), dec!(80)),
            Err(InvoiceError::NegativeAmount(dec!(-1)))
        );
    }

    #[test]
    fn test_convert_overflow_is_an_error() {
        assert_eq!(
            convert_amount(Decimal::MAX, Decimal::TWO),
            Err(InvoiceError::AmountOverflow)
        );
        assert_eq!(
            convert_amount(dec!(1000), Decimal::MAX),
            Err(InvoiceError::AmountOverflow)
        );
        assert_eq!(convert_amount(Decimal::MAX, Decimal::ONE).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_display_rounding_midpoint_away_from_zero() {
        assert_eq!(round_for_display(dec!(1332.7578)), dec!(1332.76));
        assert_eq!(round_for_display(dec!(2.345)), dec!(2.35));
        assert_eq!(round_for_display(dec!(2.355)), dec!(2.36));
        assert_eq!(round_for_display(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_display_rounding_pads_to_two_places() {
        assert_eq!(round_for_display(dec!(8000)).to_string(), "8000.00");
        assert_eq!(round_for_display(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(round_for_display(dec!(7404.2100)).to_string(), "7404.21");
    }

    #[test]
    fn test_whole_rounding() {
        assert_eq!(round_to_whole(dec!(2.5)), dec!(3));
        assert_eq!(round_to_whole(dec!(3.5)), dec!(4));
        assert_eq!(round_to_whole(dec!(258851.25)), dec!(258851));
    }
}
