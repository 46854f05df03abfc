//! Amount-in-words rendering using the Indian numbering system.
//!
//! Tax invoices print the rounded rupee total as words grouped by
//! crore (10^7), lakh (10^5), thousand and hundred.

pub mod indian;

#[cfg(test)]
mod props;

pub use indian::{WORDS_LIMIT, amount_in_words, decimal_to_words, number_to_words};
