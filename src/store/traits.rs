//! `DraftStore` trait — async interface to the durable draft slot.

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend-agnostic string key/value store holding the wizard draft.
///
/// Semantics follow web local storage: flat string keys and values, absent
/// keys read as `None`, `set` overwrites, removing a missing key succeeds.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` if present.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
