//! Draft persistence: saves the in-progress record around submission
//! attempts and restores it after a failed one.
//!
//! Storage trouble must never take the wizard down, so every operation here
//! logs and carries on instead of returning errors. A draft is only offered
//! back while the separate failed flag is set; a clean exit leaves nothing
//! behind.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::store::DraftStore;

use super::record::{storage_keys, BrandRecord};

/// Writes the record to the durable slot and restores it on demand.
pub struct DraftPersistence {
    store: Arc<dyn DraftStore>,
}

impl DraftPersistence {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    /// Serialize and store the record under the draft key, replacing any
    /// prior draft.
    pub async fn save(&self, record: &BrandRecord) {
        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize draft");
                return;
            }
        };
        if let Err(e) = self.store.set(storage_keys::DRAFT, &raw).await {
            warn!(error = %e, "failed to save draft");
        }
    }

    /// Set the failed-submission flag. The draft becomes restorable.
    pub async fn mark_failed(&self) {
        if let Err(e) = self
            .store
            .set(storage_keys::FAILED_FLAG, storage_keys::FAILED_VALUE)
            .await
        {
            warn!(error = %e, "failed to set draft failed flag");
        }
    }

    /// Drop the failed flag, keeping any stored draft.
    pub async fn clear_failed_flag(&self) {
        if let Err(e) = self.store.remove(storage_keys::FAILED_FLAG).await {
            warn!(error = %e, "failed to clear draft failed flag");
        }
    }

    /// Remove the draft and the flag. Called after a successful submission.
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(storage_keys::DRAFT).await {
            warn!(error = %e, "failed to remove draft");
        }
        self.clear_failed_flag().await;
    }

    /// Return the stored record if the failed flag is set and the draft
    /// parses. Anything else reads as "no draft"; a draft that no longer
    /// parses is also cleared so it is not retried on every mount.
    pub async fn try_restore(&self) -> Option<BrandRecord> {
        let flag = match self.store.get(storage_keys::FAILED_FLAG).await {
            Ok(flag) => flag,
            Err(e) => {
                warn!(error = %e, "failed to read draft failed flag");
                return None;
            }
        };
        if flag.as_deref() != Some(storage_keys::FAILED_VALUE) {
            return None;
        }

        let raw = match self.store.get(storage_keys::DRAFT).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("failed flag set but no draft stored");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "failed to read draft");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "stored draft does not parse, clearing it");
                self.clear().await;
                None
            }
        }
    }
}
