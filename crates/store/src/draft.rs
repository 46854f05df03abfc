//! Single-invoice drafts saved between sessions.

use std::path::{Path, PathBuf};

use tracing::debug;

use gst_invoice_core::invoice::Invoice;

use crate::error::StoreError;

/// A draft invoice file.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    /// Points at a draft file; nothing is read until [`Self::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Draft file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the draft. A missing file yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `Io` on read failure and `Serialization` for malformed JSON.
    pub async fn load(&self) -> Result<Option<Invoice>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let invoice =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::serialization(&self.path, e))?;
        debug!(path = %self.path.display(), "Loaded draft");
        Ok(Some(invoice))
    }

    /// Writes the draft, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    pub async fn save(&self, invoice: &Invoice) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(invoice)
            .map_err(|e| StoreError::serialization(&self.path, e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "Saved draft");
        Ok(())
    }
}
