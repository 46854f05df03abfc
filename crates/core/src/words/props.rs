//! Property-based tests for the words formatter.

use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::indian::{WORDS_LIMIT, decimal_to_words, number_to_words};

/// Strategy for amounts a human reader is expected to decode (below 10^9).
fn readable_amount() -> impl Strategy<Value = u64> {
    0u64..1_000_000_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Different magnitudes never share the same words.
    #[test]
    fn prop_distinct_numbers_distinct_words(
        a in readable_amount(),
        b in readable_amount(),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(number_to_words(a).unwrap(), number_to_words(b).unwrap());
    }

    /// Words are single-spaced, trimmed and title case.
    #[test]
    fn prop_words_are_well_formed(n in 0u64..WORDS_LIMIT) {
        let words = number_to_words(n).unwrap();
        prop_assert_eq!(words.trim(), words.as_str());
        prop_assert!(!words.contains("  "));
        for word in words.split(' ') {
            let first = word.chars().next().unwrap();
            prop_assert!(word == "and" || first.is_ascii_uppercase(), "bad word {:?} in {:?}", word, words);
        }
    }

    /// "and" joins only the final segment, never a crore count.
    #[test]
    fn prop_at_most_one_and(n in 0u64..WORDS_LIMIT) {
        let words = number_to_words(n).unwrap();
        prop_assert!(words.matches(" and ").count() <= 1, "{}", words);
        prop_assert!(!words.starts_with("and"));
    }

    /// Decimal and integer entry points agree on whole numbers.
    #[test]
    fn prop_decimal_entry_matches_integer_entry(n in readable_amount()) {
        prop_assert_eq!(decimal_to_words(Decimal::from(n)).unwrap(), number_to_words(n).unwrap());
    }

    /// Everything at or beyond 10^15 is rejected.
    #[test]
    fn prop_out_of_range_rejected(n in WORDS_LIMIT..u64::MAX) {
        prop_assert!(number_to_words(n).is_err());
    }
}

#[test]
fn test_generated_range_has_no_collisions() {
    let mut seen = HashSet::new();
    for n in 0..=120_000u64 {
        let words = number_to_words(n).unwrap();
        assert!(seen.insert(words.clone()), "collision at {n}: {words}");
    }
}
