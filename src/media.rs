//! Storage for files attached to posts.
//!
//! Files are written under a content-addressed name (`<sha256>.<ext>`), so the
//! reference recorded on a post stays valid across restarts and identical
//! uploads share one file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::MEDIA_URL_PREFIX;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("attached file is empty")]
    Empty,
    #[error("failed to store media file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file chosen by the user for attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// File extension to store the file under.
    ///
    /// Taken from the original file name when it has a sane one, otherwise
    /// guessed from the declared content type.
    #[must_use]
    pub fn extension(&self) -> String {
        let from_name = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()));

        from_name
            .or_else(|| {
                self.content_type
                    .as_deref()
                    .and_then(mime_guess::get_mime_extensions_str)
                    .and_then(|exts| exts.first())
                    .map(|e| (*e).to_string())
            })
            .unwrap_or_else(|| "bin".to_string())
    }
}

/// Result of storing an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Reference recorded on the post, e.g. `/media/<sha256>.png`.
    pub reference: String,
    /// False when identical content was already stored.
    pub newly_written: bool,
}

/// Media files kept in one directory and served under `/media/`.
#[derive(Debug, Clone)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the file and return where it was stored.
    ///
    /// The existence check and the write are not atomic, so callers must not
    /// store concurrently. [`crate::board::Board`] holds its store lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is empty, its destination cannot be
    /// checked, or it cannot be written.
    pub async fn store(&self, file: &SelectedFile) -> Result<StoredMedia, MediaError> {
        if file.bytes.is_empty() {
            return Err(MediaError::Empty);
        }

        let digest = hex::encode(Sha256::digest(&file.bytes));
        let name = format!("{digest}.{}", file.extension());
        let path = self.dir.join(&name);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| MediaError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| MediaError::Io {
                path: path.clone(),
                source,
            })?;
        let newly_written = !exists;
        if exists {
            debug!(path = %path.display(), "Media already stored");
        } else {
            tokio::fs::write(&path, &file.bytes)
                .await
                .map_err(|source| MediaError::Io {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path.display(), bytes = file.bytes.len(), "Stored media");
        }

        Ok(StoredMedia {
            reference: format!("{MEDIA_URL_PREFIX}{name}"),
            newly_written,
        })
    }

    /// Remove a previously stored file. Best-effort.
    pub async fn remove(&self, reference: &str) {
        let Some(name) = reference.strip_prefix(MEDIA_URL_PREFIX) else {
            return;
        };
        if name.contains('/') || name.contains("..") {
            return;
        }
        let path = self.dir.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!(path = %path.display(), "Removed media"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove media"),
        }
    }
}
