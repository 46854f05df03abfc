//! Invoice computation errors.
//!
//! Every failure here is a deterministic rejection of the caller's input.
//! Nothing is retried and nothing is silently coerced to zero.

use rust_decimal::Decimal;
use thiserror::Error;

use gst_invoice_shared::AppError;

/// Coarse classification of [`InvoiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Negative, non-numeric or missing input; empty line-item list.
    InvalidInput,
    /// Integer magnitude exceeds what the words formatter can express.
    OutOfRangeForWords,
}

/// Errors raised by the invoice computation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    // ========== Invalid Input ==========
    /// An invoice must carry at least one line item.
    #[error("Invoice must have at least one line item")]
    EmptyLineItems,

    /// Line item quantity is negative.
    #[error("Quantity cannot be negative: {0}")]
    NegativeQuantity(Decimal),

    /// Line item rate is negative.
    #[error("Rate cannot be negative: {0}")]
    NegativeRate(Decimal),

    /// Amount is negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Exchange rate is zero or negative.
    #[error("Exchange rate must be positive, got {0}")]
    InvalidExchangeRate(Decimal),

    /// Tax rate is outside `[0, 1]`.
    #[error("Tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),

    /// Words can only be produced for whole amounts.
    #[error("Amount must be a whole number to render in words, got {0}")]
    NonIntegerAmount(Decimal),

    /// An intermediate amount left the representable decimal range.
    #[error("Amount exceeds the supported range")]
    AmountOverflow,

    /// A required text field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    // ========== Out Of Range ==========
    /// Value is beyond the crore/lakh grouping range.
    #[error("Amount {0} is too large to render in words")]
    OutOfRangeForWords(Decimal),
}

impl InvoiceError {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRangeForWords(_) => ErrorKind::OutOfRangeForWords,
            _ => ErrorKind::InvalidInput,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLineItems => "EMPTY_LINE_ITEMS",
            Self::NegativeQuantity(_) => "NEGATIVE_QUANTITY",
            Self::NegativeRate(_) => "NEGATIVE_RATE",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::InvalidExchangeRate(_) => "INVALID_EXCHANGE_RATE",
            Self::InvalidTaxRate(_) => "INVALID_TAX_RATE",
            Self::NonIntegerAmount(_) => "NON_INTEGER_AMOUNT",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::OutOfRangeForWords(_) => "OUT_OF_RANGE_FOR_WORDS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidInput => 400,
            ErrorKind::OutOfRangeForWords => 422,
        }
    }

    /// Core errors are pure-function rejections; none are transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => Self::Validation(err.to_string()),
            ErrorKind::OutOfRangeForWords => Self::OutOfRange(err.to_string()),
        }
    }
}
