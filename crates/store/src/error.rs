//! Record store errors.

use std::path::PathBuf;

use thiserror::Error;

use gst_invoice_core::InvoiceError;
use gst_invoice_shared::AppError;
use gst_invoice_shared::types::InvoiceId;

/// Errors raised by [`crate::InvoiceRepository`] and [`crate::DraftStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this ID is visible to the caller.
    #[error("Invoice {0} not found")]
    NotFound(InvoiceId),

    /// The invoice failed validation or computation.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file holds malformed JSON.
    #[error("Malformed data in {path}: {source}")]
    Serialization {
        /// File being parsed or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(format!("Invoice {id}")),
            StoreError::Invoice(e) => e.into(),
            e @ (StoreError::Io { .. } | StoreError::Serialization { .. }) => {
                Self::Storage(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error() {
        let id = InvoiceId::new();
        let err: AppError = StoreError::NotFound(id).into();
        assert_eq!(err.status_code(), 404);

        let err: AppError = StoreError::Invoice(InvoiceError::EmptyLineItems).into();
        assert_eq!(err.status_code(), 400);

        let io = std::io::Error::other("disk full");
        let err: AppError = StoreError::io("data/invoices.json", io).into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("data/invoices.json"));
    }
}
