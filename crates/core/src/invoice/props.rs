//! Property-based tests for invoice totals.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::tax::TaxPolicy;
use super::totals::compute_totals;
use super::types::LineItem;
use crate::currency::convert_amount;
use crate::error::InvoiceError;

/// Strategy for non-negative foreign amounts (0.00 to 100,000.00).
fn foreign_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for positive exchange rates (0.0001 to 1000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy for tax rates in `[0, 1]` at basis-point precision.
fn tax_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

/// Strategy covering the whole non-negative decimal range up to `Decimal::MAX`.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
}

fn line_items() -> impl Strategy<Value = Vec<LineItem>> {
    items_from(foreign_amount())
}

fn items_from(amount: impl Strategy<Value = Decimal>) -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(amount, 1..8).prop_map(|amounts| {
        amounts
            .into_iter()
            .map(|amount| LineItem {
                description: "Service".to_string(),
                hsn_sac: "998314".to_string(),
                quantity: Decimal::ONE,
                rate: amount,
                amount,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Total is always subtotal plus tax.
    #[test]
    fn prop_total_is_subtotal_plus_tax(
        items in line_items(),
        fx in positive_rate(),
        rate in tax_rate(),
    ) {
        let policy = TaxPolicy::percent_of_local(rate).unwrap();
        let totals = compute_totals(&items, fx, &policy).unwrap();
        prop_assert_eq!(totals.total_local, totals.subtotal_local + totals.tax_local);
        prop_assert!(totals.tax_local <= totals.subtotal_local);
    }

    /// Zero-rated invoices never carry tax.
    #[test]
    fn prop_zero_rated_has_no_tax(items in line_items(), fx in positive_rate()) {
        let totals = compute_totals(&items, fx, &TaxPolicy::ZeroRated).unwrap();
        prop_assert_eq!(totals.tax_local, Decimal::ZERO);
        prop_assert_eq!(totals.total_local, totals.subtotal_local);
    }

    /// Local subtotal is the converted foreign sum.
    #[test]
    fn prop_subtotal_converted_once(items in line_items(), fx in positive_rate()) {
        let totals = compute_totals(&items, fx, &TaxPolicy::ZeroRated).unwrap();
        let sum: Decimal = items.iter().map(|item| item.amount).sum();
        prop_assert_eq!(totals.subtotal_foreign, sum);
        prop_assert_eq!(totals.subtotal_local, convert_amount(sum, fx).unwrap());
    }

    /// Recomputing from unchanged inputs gives identical totals.
    #[test]
    fn prop_recompute_is_stable(
        items in line_items(),
        fx in positive_rate(),
        rate in tax_rate(),
    ) {
        let policy = TaxPolicy::percent_of_local(rate).unwrap();
        let first = compute_totals(&items, fx, &policy).unwrap();
        let second = compute_totals(&items, fx, &policy).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.rounded(), second.rounded());
    }

    /// Item order does not change totals.
    #[test]
    fn prop_order_independent(items in line_items(), fx in positive_rate()) {
        let mut reversed = items.clone();
        reversed.reverse();
        let forward = compute_totals(&items, fx, &TaxPolicy::ZeroRated).unwrap();
        let backward = compute_totals(&reversed, fx, &TaxPolicy::ZeroRated).unwrap();
        prop_assert_eq!(forward, backward);
    }

    /// Any non-negative input yields totals or an overflow error, never a panic.
    #[test]
    fn prop_full_range_never_panics(
        items in items_from(any_amount()),
        fx in any_amount(),
        rate in tax_rate(),
    ) {
        prop_assume!(fx > Decimal::ZERO);
        let policy = TaxPolicy::percent_of_local(rate).unwrap();
        match compute_totals(&items, fx, &policy) {
            Ok(totals) => {
                prop_assert_eq!(totals.total_local, totals.subtotal_local + totals.tax_local);
            }
            Err(err) => prop_assert_eq!(err, InvoiceError::AmountOverflow),
        }
    }
}
