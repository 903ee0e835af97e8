use std::sync::Arc;

use async_trait::async_trait;

use super::error::{LoadError, PersistError};
use super::models::Post;
use super::storage::KeyValueStore;

/// Load and save the whole post collection.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Read the persisted collection. An absent value is an empty collection.
    async fn load(&self) -> Result<Vec<Post>, LoadError>;

    /// Replace the persisted collection with `posts`.
    async fn save(&self, posts: &[Post]) -> Result<(), PersistError>;
}

/// Repository storing the collection as one JSON array under a single key.
#[derive(Clone)]
pub struct KeyValueRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl std::fmt::Debug for KeyValueRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PostRepository for KeyValueRepository {
    async fn load(&self) -> Result<Vec<Post>, LoadError> {
        match self.store.get(&self.key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, posts: &[Post]) -> Result<(), PersistError> {
        let raw = serde_json::to_string(posts)?;
        self.store.set(&self.key, &raw).await?;
        Ok(())
    }
}
