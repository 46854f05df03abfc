//! Indian-grouping number-to-words formatter.
//!
//! Output is title case with single spaces, e.g.
//! `259075 -> "Two Lakh Fifty Nine Thousand and Seventy Five"`.
//! The final two-digit segment is prefixed with "and" only when a higher
//! group was emitted before it. A crore count is read as a plain group, so
//! `1_050_000_000 -> "One Hundred Five Crore"`; counts of 1000 crore and
//! above reuse the lakh/thousand scales for the count itself.

use rust_decimal::prelude::*;

use crate::currency::round_to_whole;
use crate::error::InvoiceError;

/// Exclusive upper bound of the formatter (10^15).
pub const WORDS_LIMIT: u64 = 1_000_000_000_000_000;

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;
const HUNDRED: u64 = 100;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Converts a non-negative integer below [`WORDS_LIMIT`] into words.
///
/// # Example
///
/// ```
/// use gst_invoice_core::words::number_to_words;
///
/// assert_eq!(number_to_words(105).unwrap(), "One Hundred and Five");
/// assert_eq!(number_to_words(10_000_000).unwrap(), "One Crore");
/// ```
///
/// # Errors
///
/// Returns `OutOfRangeForWords` when `n >= 10^15`.
pub fn number_to_words(n: u64) -> Result<String, InvoiceError> {
    if n >= WORDS_LIMIT {
        return Err(InvoiceError::OutOfRangeForWords(Decimal::from(n)));
    }
    if n == 0 {
        return Ok("Zero".to_string());
    }
    Ok(compose(n, true))
}

/// Converts a whole, non-negative decimal into words.
///
/// # Errors
///
/// Returns `NegativeAmount` for values below zero, `NonIntegerAmount` when a
/// fractional part is present and `OutOfRangeForWords` past 10^15.
pub fn decimal_to_words(value: Decimal) -> Result<String, InvoiceError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(InvoiceError::NegativeAmount(value));
    }
    if !value.fract().is_zero() {
        return Err(InvoiceError::NonIntegerAmount(value));
    }
    let n = value
        .to_u64()
        .ok_or(InvoiceError::OutOfRangeForWords(value))?;
    number_to_words(n)
}

/// Renders a local-currency total as words after rounding to the nearest
/// whole unit (midpoint away from zero).
///
/// # Errors
///
/// Same as [`decimal_to_words`] applied to the rounded value.
pub fn amount_in_words(total_local: Decimal) -> Result<String, InvoiceError> {
    if total_local.is_sign_negative() && !total_local.is_zero() {
        return Err(InvoiceError::NegativeAmount(total_local));
    }
    decimal_to_words(round_to_whole(total_local))
}

/// Words for `n > 0`. The crore count recurses without "and" so that
/// 10^12 reads "One Lakh Crore" and only the last segment is joined.
fn compose(n: u64, and_before_rest: bool) -> String {
    let crore = n / CRORE;
    let lakh = (n / LAKH) % 100;
    let thousand = (n / THOUSAND) % 100;
    let hundred = (n / HUNDRED) % 10;
    let rest = n % 100;

    let mut parts: Vec<String> = Vec::with_capacity(5);
    if crore > 0 {
        parts.push(format!("{} Crore", compose(crore, false)));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", segment(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", segment(thousand)));
    }
    if hundred > 0 {
        parts.push(format!("{} Hundred", ONES[index(hundred)]));
    }
    if rest > 0 {
        if parts.is_empty() || !and_before_rest {
            parts.push(segment(rest));
        } else {
            parts.push(format!("and {}", segment(rest)));
        }
    }
    parts.join(" ")
}

/// Words for `0 < x < 100`.
fn segment(x: u64) -> String {
    if x < 20 {
        return ONES[index(x)].to_string();
    }
    let tens = TENS[index(x / 10)];
    match x % 10 {
        0 => tens.to_string(),
        ones => format!("{tens} {}", ONES[index(ones)]),
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn index(x: u64) -> usize {
    // callers only pass values below 100
    x as usize
}
