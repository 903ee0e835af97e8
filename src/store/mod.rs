//! The post store: the canonical in-memory collection and its persistence.
//!
//! Every mutation builds the next collection, writes the whole of it through
//! the [`PostRepository`], and only then replaces the in-memory copy. A failed
//! write therefore leaves memory exactly as it was before the call.

mod error;
mod id;
mod models;
mod repository;
mod storage;

pub use error::{LoadError, PersistError, StorageError};
pub use id::IdGenerator;
pub use models::{is_video_reference, Post};
pub use repository::{KeyValueRepository, PostRepository};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

pub struct PostStore {
    repo: Arc<dyn PostRepository>,
    posts: Vec<Post>,
    ids: IdGenerator,
}

impl PostStore {
    /// Create an empty store. Call [`PostStore::load`] to read persisted posts.
    #[must_use]
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            repo,
            posts: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Current collection, newest first.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the stored value cannot be read or parsed. The
    /// in-memory collection is left empty in that case.
    pub async fn load(&mut self) -> Result<&[Post], LoadError> {
        match self.repo.load().await {
            Ok(posts) => {
                for post in &posts {
                    self.ids.observe(post.id);
                }
                info!(count = posts.len(), "Loaded posts");
                self.posts = posts;
                Ok(&self.posts)
            }
            Err(e) => {
                self.posts.clear();
                Err(e)
            }
        }
    }

    /// Create a post at the front of the collection and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the collection cannot be written; the
    /// in-memory collection is unchanged.
    pub async fn create(
        &mut self,
        title: &str,
        content: &str,
        media: Option<String>,
    ) -> Result<Post, PersistError> {
        let now = Utc::now();
        let id = self.ids.next_id_at(now.timestamp_millis());
        let post = Post::new(
            id,
            title,
            content,
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
            media,
        );

        let mut next = Vec::with_capacity(self.posts.len() + 1);
        next.push(post.clone());
        next.extend(self.posts.iter().cloned());

        self.repo.save(&next).await?;
        self.posts = next;

        debug!(post_id = post.id, "Created post");
        Ok(post)
    }

    /// Increment the like counter of the post with `post_id`.
    ///
    /// An unknown id is not an error: nothing is written and the collection is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the collection cannot be written; the
    /// in-memory collection is unchanged.
    pub async fn like(&mut self, post_id: i64) -> Result<&[Post], PersistError> {
        if !self.posts.iter().any(|p| p.id == post_id) {
            debug!(post_id, "Like for unknown post ignored");
            return Ok(&self.posts);
        }

        let next: Vec<Post> = self
            .posts
            .iter()
            .map(|p| {
                if p.id == post_id {
                    Post {
                        likes: p.likes.saturating_add(1),
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect();

        self.repo.save(&next).await?;
        self.posts = next;

        debug!(post_id, "Liked post");
        Ok(&self.posts)
    }
}

impl std::fmt::Debug for PostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostStore")
            .field("posts", &self.posts.len())
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> (Arc<MemoryStore>, PostStore) {
        let kv = Arc::new(MemoryStore::new());
        let repo = Arc::new(KeyValueRepository::new(kv.clone(), "forumPosts"));
        (kv, PostStore::new(repo))
    }

    #[tokio::test]
    async fn test_create_on_empty_storage() {
        let (_kv, mut store) = memory_store();
        store.load().await.unwrap();

        let post = store.create("Hello", "World", None).await.unwrap();

        assert_eq!(store.posts().len(), 1);
        let stored = &store.posts()[0];
        assert_eq!(stored, &post);
        assert_eq!(stored.title, "Hello");
        assert_eq!(stored.content, "World");
        assert_eq!(stored.likes, 0);
        assert_eq!(stored.replies, 0);
        assert_eq!(stored.author, "Anonymous");
        assert!(stored.media.is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(&stored.created_at).is_ok());
    }

    #[tokio::test]
    async fn test_creates_are_newest_first() {
        let (_kv, mut store) = memory_store();
        for i in 0..5 {
            store.create(&format!("post {i}"), "body", None).await.unwrap();
        }

        let titles: Vec<_> = store.posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["post 4", "post 3", "post 2", "post 1", "post 0"]);

        let ids: Vec<_> = store.posts().iter().map(|p| p.id).collect();
        assert!(ids.windows(2).all(|w| w[0] > w[1]), "ids must be unique and ordered");
    }

    #[tokio::test]
    async fn test_like_present_post() {
        let kv = Arc::new(MemoryStore::new().with_value(
            "forumPosts",
            r#"[{"id":200,"title":"b","content":"B","author":"Anonymous","createdAt":"t","likes":5,"replies":0},
                {"id":100,"title":"a","content":"A","author":"Anonymous","createdAt":"t","likes":0,"replies":0}]"#,
        ));
        let mut store = PostStore::new(Arc::new(KeyValueRepository::new(kv, "forumPosts")));
        let before = store.load().await.unwrap().to_vec();

        let after = store.like(100).await.unwrap().to_vec();

        assert_eq!(after[1].likes, 1);
        assert_eq!(after[1], Post { likes: 1, ..before[1].clone() });
        assert_eq!(after[0], before[0]);
    }

    #[tokio::test]
    async fn test_like_absent_post_is_noop() {
        let (kv, mut store) = memory_store();
        store.create("a", "A", None).await.unwrap();
        let before = store.posts().to_vec();
        let raw_before = kv.raw("forumPosts").await;

        let after = store.like(999).await.unwrap().to_vec();

        assert_eq!(after, before);
        assert_eq!(kv.raw("forumPosts").await, raw_before);
    }

    #[tokio::test]
    async fn test_round_trip_after_mutations() {
        let (kv, mut store) = memory_store();
        let first = store.create("a", "A", None).await.unwrap();
        store
            .create("b", "B", Some("/media/x.png".to_string()))
            .await
            .unwrap();
        store.like(first.id).await.unwrap();
        store.like(first.id).await.unwrap();

        let repo = Arc::new(KeyValueRepository::new(kv, "forumPosts"));
        let mut reloaded = PostStore::new(repo);
        reloaded.load().await.unwrap();

        assert_eq!(reloaded.posts(), store.posts());
        assert_eq!(reloaded.posts()[1].likes, 2);
    }

    #[tokio::test]
    async fn test_create_rolls_back_on_persist_failure() {
        let (kv, mut store) = memory_store();
        store.create("a", "A", None).await.unwrap();
        let before = store.posts().to_vec();

        kv.set_fail_writes(true);
        let result = store.create("b", "B", None).await;

        assert!(matches!(result, Err(PersistError::Storage(_))));
        assert_eq!(store.posts(), before.as_slice());
    }

    #[tokio::test]
    async fn test_like_rolls_back_on_persist_failure() {
        let (kv, mut store) = memory_store();
        let post = store.create("a", "A", None).await.unwrap();
        let before = store.posts().to_vec();

        kv.set_fail_writes(true);
        assert!(store.like(post.id).await.is_err());
        assert_eq!(store.posts(), before.as_slice());

        kv.set_fail_writes(false);
        assert_eq!(store.like(post.id).await.unwrap()[0].likes, 1);
    }

    #[tokio::test]
    async fn test_quota_exceeded_rolls_back() {
        let kv = Arc::new(MemoryStore::new().with_quota(300));
        let mut store = PostStore::new(Arc::new(KeyValueRepository::new(kv, "forumPosts")));
        store.create("a", "A", None).await.unwrap();
        let before = store.posts().to_vec();

        let err = store.create("b", &"x".repeat(400), None).await.unwrap_err();

        assert!(err.is_quota_exceeded());
        assert_eq!(store.posts(), before.as_slice());
    }

    #[tokio::test]
    async fn test_load_malformed_leaves_empty() {
        let kv = Arc::new(MemoryStore::new().with_value("forumPosts", "not json"));
        let mut store = PostStore::new(Arc::new(KeyValueRepository::new(kv, "forumPosts")));

        assert!(store.load().await.is_err());
        assert!(store.posts().is_empty());

        // The board keeps working after a failed load.
        store.create("a", "A", None).await.unwrap();
        assert_eq!(store.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_continue_after_loaded_posts() {
        let far_future = i64::MAX / 2;
        let raw = format!(
            r#"[{{"id":{far_future},"title":"a","content":"A","author":"Anonymous","createdAt":"t","likes":0,"replies":0}}]"#
        );
        let kv = Arc::new(MemoryStore::new().with_value("forumPosts", &raw));
        let mut store = PostStore::new(Arc::new(KeyValueRepository::new(kv, "forumPosts")));
        store.load().await.unwrap();

        let post = store.create("b", "B", None).await.unwrap();
        assert_eq!(post.id, far_future + 1);
    }
}
