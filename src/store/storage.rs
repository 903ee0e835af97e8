//! Key-value string storage backing the post repository.
//!
//! A store maps a key to one opaque string value, the way browser local
//! storage does. Encoding is the repository's concern, not the store's.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::StorageError;

/// String storage addressed by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`. Returns `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

fn check_quota(key: &str, value: &str, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(quota) if value.len() > quota => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            quota,
        }),
        _ => Ok(()),
    }
}

/// In-process store, used by tests and ephemeral boards.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the size of any single value, in bytes.
    #[must_use]
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Seed a raw value, bypassing the quota.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values
            .get_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent write fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The raw value currently held for `key`.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "writes are disabled on this store".to_string(),
            ));
        }
        check_quota(key, value, self.quota)?;
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable store keeping each key in its own `<key>.json` file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: None,
        }
    }

    /// Limit the size of any single value, in bytes.
    #[must_use]
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    /// Path of the file holding `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value yet");
                Ok(None)
            }
            Err(e) => Err(StorageError::Io {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(key, value, self.quota)?;

        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp_path, value).await.map_err(io_err)?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(io_err(e));
        }

        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_memory_store_quota() {
        let store = MemoryStore::new().with_quota(4);
        store.set("k", "1234").await.unwrap();
        let err = store.set("k", "12345").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { size: 5, quota: 4, .. }));
        assert_eq!(store.raw("k").await.as_deref(), Some("1234"));
    }

    #[tokio::test]
    async fn test_memory_store_fail_writes() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.set("k", "v").await.is_err());
        store.set_fail_writes(false);
        assert!(store.set("k", "v").await.is_ok());
    }

    #[tokio::test]
    async fn test_file_store_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("forumPosts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.set("forumPosts", "[]").await.unwrap();
        assert_eq!(store.get("forumPosts").await.unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("forumPosts").exists());
        assert!(!dir.path().join("nested/.forumPosts.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_quota_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).with_quota(Some(8));
        store.set("k", "[1,2]").await.unwrap();
        assert!(store.set("k", "[1,2,3,4,5]").await.is_err());
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[1,2]"));
    }
}
