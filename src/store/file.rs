//! File-backed `DraftStore`: one JSON object file mapping keys to values.
//!
//! The draft survives process restarts, which is the whole point of the
//! failed-submission recovery path. Writes are read-modify-write on the
//! full map, serialized by an internal lock.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::StoreError;

use super::traits::DraftStore;

/// Durable store writing all keys into a single JSON file.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file and its parent
    /// directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the full map from disk. A missing file is an empty map.
    async fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Like [`load`], but a corrupt file is replaced by an empty map so a
    /// write can still land.
    async fn load_for_update(&self) -> HashMap<String, String> {
        match self.load().await {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "draft file unreadable, starting over"
                );
                HashMap::new()
            }
        }
    }

    async fn persist(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl DraftStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let map = self.load().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_for_update().await;
        map.insert(key.to_string(), value.to_string());
        self.persist(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_for_update().await;
        if map.remove(key).is_some() {
            self.persist(&map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("draft.json"));
        (store, dir)
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let (store, _dir) = test_store();
        assert_eq!(store.get("draft").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");

        let store = FileStore::new(&path);
        store.set("draft", r#"{"name":"Acme"}"#).await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("draft").await.unwrap().as_deref(),
            Some(r#"{"name":"Acme"}"#)
        );
    }

    #[tokio::test]
    async fn set_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state/deep/draft.json"));
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn remove_deletes_only_its_key() {
        let (store, _dir) = test_store();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();

        store.remove("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn removing_missing_key_is_fine() {
        let (store, _dir) = test_store();
        store.remove("nope").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn corrupt_file_errors_on_read_but_recovers_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, "not json").await.unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("k").await.is_err());

        // A write replaces the corrupt file and reads work again.
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
