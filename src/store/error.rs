use thiserror::Error;

/// Failure of the underlying key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded for key {key}: {size} bytes exceeds limit of {quota} bytes")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// The persisted collection could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read saved posts: {0}")]
    Storage(#[from] StorageError),
    #[error("saved posts are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The collection could not be written back to storage.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode posts: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to save posts: {0}")]
    Storage(#[from] StorageError),
}

impl PersistError {
    /// Whether the write was refused for lack of space.
    #[must_use]
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Storage(StorageError::QuotaExceeded { .. }))
    }
}
