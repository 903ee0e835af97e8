//! The board: post store, media store and the banner message, shared by all
//! request handlers.
//!
//! Each store operation holds the store lock for its whole
//! read-modify-write, so operations never interleave within this process.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::constants::{LOAD_FAILED_MESSAGE, PERSIST_FAILED_MESSAGE};
use crate::media::{MediaError, MediaStore, SelectedFile};
use crate::store::{PersistError, Post, PostRepository, PostStore};

#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug)]
pub struct Board {
    store: Mutex<PostStore>,
    media: MediaStore,
    banner: RwLock<Option<String>>,
}

impl Board {
    /// Load the persisted posts and build the board.
    ///
    /// A collection that cannot be read is not fatal: the board starts empty
    /// and shows a banner instead.
    pub async fn open(repo: Arc<dyn PostRepository>, media: MediaStore) -> Self {
        let mut store = PostStore::new(repo);
        let banner = match store.load().await {
            Ok(_) => None,
            Err(e) => {
                error!(error = %e, "Failed to load posts; starting empty");
                Some(LOAD_FAILED_MESSAGE.to_string())
            }
        };

        Self {
            store: Mutex::new(store),
            media,
            banner: RwLock::new(banner),
        }
    }

    /// Snapshot of the current collection, newest first.
    pub async fn posts(&self) -> Vec<Post> {
        self.store.lock().await.posts().to_vec()
    }

    /// Create a post, storing `file` as its attachment.
    ///
    /// The attachment write, the save and any cleanup all happen under the
    /// store lock. When the save fails, the attachment is removed only if this
    /// call wrote it and no saved post refers to it.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError::Media`] if the attachment cannot be stored, and
    /// [`CreateError::Persist`] if the collection could not be saved. In the
    /// latter case the banner is set and the collection is unchanged.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        file: Option<&SelectedFile>,
    ) -> Result<Post, CreateError> {
        let mut store = self.store.lock().await;

        let stored = match file {
            Some(file) => match self.media.store(file).await {
                Ok(stored) => Some(stored),
                Err(e) => {
                    warn!(file_name = %file.file_name, error = %e, "Failed to store attachment");
                    return Err(e.into());
                }
            },
            None => None,
        };

        let reference = stored.as_ref().map(|s| s.reference.clone());
        let e = match store.create(title, content, reference).await {
            Ok(post) => {
                info!(post_id = post.id, has_media = post.media.is_some(), "Post created");
                return Ok(post);
            }
            Err(e) => e,
        };

        if let Some(stored) = stored.filter(|s| s.newly_written) {
            let referenced = store
                .posts()
                .iter()
                .any(|p| p.media.as_deref() == Some(stored.reference.as_str()));
            if referenced {
                debug!(reference = %stored.reference, "Keeping media referenced by a saved post");
            } else {
                self.media.remove(&stored.reference).await;
            }
        }
        drop(store);

        error!(error = %e, quota_exceeded = e.is_quota_exceeded(), "Failed to save new post");
        self.set_banner(PERSIST_FAILED_MESSAGE).await;
        Err(e.into())
    }

    /// Like a post. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the collection could not be saved. The
    /// banner is set and the collection is unchanged.
    pub async fn like(&self, post_id: i64) -> Result<Vec<Post>, PersistError> {
        let result = self
            .store
            .lock()
            .await
            .like(post_id)
            .await
            .map(<[Post]>::to_vec);
        match result {
            Ok(posts) => Ok(posts),
            Err(e) => {
                error!(post_id, error = %e, "Failed to save like");
                self.set_banner(PERSIST_FAILED_MESSAGE).await;
                Err(e)
            }
        }
    }

    /// The message currently shown above the board, if any.
    pub async fn banner(&self) -> Option<String> {
        self.banner.read().await.clone()
    }

    /// Show `message`, replacing any previous one.
    pub async fn set_banner(&self, message: impl Into<String>) {
        *self.banner.write().await = Some(message.into());
    }

    pub async fn clear_banner(&self) {
        *self.banner.write().await = None;
    }
}
