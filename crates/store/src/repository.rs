//! User-scoped invoice repository.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use gst_invoice_core::invoice::Invoice;
use gst_invoice_shared::types::{InvoiceId, UserId};

use crate::error::StoreError;
use crate::record::InvoiceRecord;

type Records = HashMap<InvoiceId, InvoiceRecord>;

/// Repository of invoice records.
///
/// Every lookup is scoped to a user: a record owned by someone else behaves
/// exactly like a missing one. When opened with a path, the full record set
/// is written back to that file before a mutation becomes visible.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    records: Arc<RwLock<Records>>,
    path: Option<PathBuf>,
}

impl InvoiceRepository {
    /// Creates a repository that keeps records in memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            path: None,
        }
    }

    /// Opens a file-backed repository, loading existing records.
    ///
    /// A missing or empty file starts an empty repository.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Serialization` if it
    /// does not hold a list of records and `Invoice` if a stored invoice no
    /// longer computes. Stored totals are always re-derived on load.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = load_records(&path).await?;
        info!(path = %path.display(), count = records.len(), "Loaded invoice records");
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            path: Some(path),
        })
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Saves a new invoice for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `Invoice` if the invoice does not compute, or a persistence
    /// error.
    pub async fn create(
        &self,
        user_id: &UserId,
        invoice: Invoice,
    ) -> Result<InvoiceRecord, StoreError> {
        let record = InvoiceRecord::new(user_id.clone(), invoice)?;

        let mut guard = self.records.write().await;
        let mut next = guard.clone();
        next.insert(record.id, record.clone());
        self.persist(&next).await?;
        *guard = next;

        info!(invoice_id = %record.id, user_id = %user_id, "Invoice created");
        Ok(record)
    }

    /// Lists the user's records, newest first.
    pub async fn list_for_user(&self, user_id: &UserId) -> Vec<InvoiceRecord> {
        let guard = self.records.read().await;
        let mut records: Vec<InvoiceRecord> = guard
            .values()
            .filter(|record| record.is_owned_by(user_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        records
    }

    /// Fetches one of the user's records.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the record is absent or owned by another user.
    pub async fn get(&self, user_id: &UserId, id: InvoiceId) -> Result<InvoiceRecord, StoreError> {
        let guard = self.records.read().await;
        guard
            .get(&id)
            .filter(|record| record.is_owned_by(user_id))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Replaces the invoice on one of the user's records.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Invoice` for an invalid replacement, or a
    /// persistence error. The stored record is unchanged on error.
    pub async fn update(
        &self,
        user_id: &UserId,
        id: InvoiceId,
        invoice: Invoice,
    ) -> Result<InvoiceRecord, StoreError> {
        let mut guard = self.records.write().await;
        let mut record = guard
            .get(&id)
            .filter(|record| record.is_owned_by(user_id))
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        record.replace(invoice)?;

        let mut next = guard.clone();
        next.insert(id, record.clone());
        self.persist(&next).await?;
        *guard = next;

        info!(invoice_id = %id, user_id = %user_id, "Invoice updated");
        Ok(record)
    }

    /// Deletes one of the user's records.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the record is absent or owned by another user,
    /// or a persistence error.
    pub async fn delete(&self, user_id: &UserId, id: InvoiceId) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        if !guard.get(&id).is_some_and(|record| record.is_owned_by(user_id)) {
            return Err(StoreError::NotFound(id));
        }

        let mut next = guard.clone();
        next.remove(&id);
        self.persist(&next).await?;
        *guard = next;

        info!(invoice_id = %id, user_id = %user_id, "Invoice deleted");
        Ok(())
    }

    async fn persist(&self, records: &Records) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut snapshot: Vec<&InvoiceRecord> = records.values().collect();
        snapshot.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::serialization(path, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        // write-then-rename so readers never see a half-written file
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| StoreError::io(path, e))?;

        debug!(path = %path.display(), count = snapshot.len(), "Persisted invoice records");
        Ok(())
    }
}

async fn load_records(path: &Path) -> Result<Records, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(HashMap::new());
    }

    let list: Vec<InvoiceRecord> =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::serialization(path, e))?;

    let mut records = HashMap::with_capacity(list.len());
    for mut record in list {
        let id = record.id;
        record
            .recompute()
            .inspect_err(|e| warn!(%id, error = %e, "Stored invoice does not compute"))?;
        records.insert(id, record);
    }
    Ok(records)
}
