//! Property-based tests for currency conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{convert_amount, round_for_display};
use crate::error::InvoiceError;

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn foreign_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Conversion is linear in the amount for a fixed rate.
    #[test]
    fn prop_convert_is_linear(
        amount in foreign_amount(),
        rate in positive_rate(),
    ) {
        let single = convert_amount(amount, rate).unwrap();
        let double = convert_amount(amount * Decimal::TWO, rate).unwrap();
        prop_assert_eq!(double, single * Decimal::TWO);
    }

    /// Converting a sum equals summing conversions at full precision.
    #[test]
    fn prop_convert_distributes_over_addition(
        a in foreign_amount(),
        b in foreign_amount(),
        rate in positive_rate(),
    ) {
        let together = convert_amount(a + b, rate).unwrap();
        let apart = convert_amount(a, rate).unwrap() + convert_amount(b, rate).unwrap();
        prop_assert_eq!(together, apart);
    }

    /// Rate of one preserves the amount.
    #[test]
    fn prop_unit_rate_preserves_amount(amount in foreign_amount()) {
        prop_assert_eq!(convert_amount(amount, Decimal::ONE).unwrap(), amount);
    }

    /// Display rounding never has more than 2 decimal places.
    #[test]
    fn prop_display_rounding_has_two_places(
        amount in foreign_amount(),
        rate in positive_rate(),
    ) {
        let shown = round_for_display(convert_amount(amount, rate).unwrap());
        let scaled = shown * Decimal::ONE_HUNDRED;
        prop_assert_eq!(scaled, scaled.round());
    }

    /// Any non-positive rate is rejected.
    #[test]
    fn prop_non_positive_rate_rejected(
        amount in foreign_amount(),
        rate in (-100_000_000i64..=0i64).prop_map(|v| Decimal::new(v, 4)),
    ) {
        prop_assert!(convert_amount(amount, rate).is_err());
    }

    /// Large products overflow into an error instead of panicking.
    #[test]
    fn prop_large_products_overflow_cleanly(
        hi in (1u32 << 31)..=u32::MAX,
        rate in (2i64..1_000i64).prop_map(Decimal::from),
    ) {
        let amount = Decimal::from_parts(u32::MAX, u32::MAX, hi, false, 0);
        prop_assert_eq!(convert_amount(amount, rate), Err(InvoiceError::AmountOverflow));
    }
}
