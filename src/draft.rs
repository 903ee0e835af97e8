//! The unsaved compose form: title, content and an optional attachment.
//!
//! A draft is `empty`, `populated`, or `populated` with an error after a
//! failed submit. A successful submit returns it to `empty`.

use thiserror::Error;

use crate::board::{Board, CreateError};
use crate::constants::PERSIST_FAILED_MESSAGE;
use crate::media::{MediaError, SelectedFile};
use crate::store::{PersistError, Post};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("title and content are required")]
    MissingFields,
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl From<CreateError> for SubmitError {
    fn from(e: CreateError) -> Self {
        match e {
            CreateError::Media(e) => Self::Media(e),
            CreateError::Persist(e) => Self::Persist(e),
        }
    }
}

impl SubmitError {
    /// Message shown to the user in the banner.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Please enter both a title and some content.",
            Self::Media(_) => "Could not store the attached file. Please try again.",
            Self::Persist(_) => PERSIST_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub file: Option<SelectedFile>,
    pub error: Option<String>,
}

impl Draft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Replace the selected file. No type or size check happens here.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.file.is_none()
    }

    /// Reset every field and the error state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record a failure without touching the fields.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Turn the draft into a post on `board`.
    ///
    /// On success the draft is cleared, along with the board's banner. On
    /// failure the fields are kept and `error` holds a message for the user.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] if a field is blank, the attachment cannot be
    /// stored, or the post cannot be saved.
    pub async fn submit(&mut self, board: &Board) -> Result<Post, SubmitError> {
        match self.try_submit(board).await {
            Ok(post) => {
                self.clear();
                board.clear_banner().await;
                Ok(post)
            }
            Err(e) => {
                self.fail(e.user_message());
                Err(e)
            }
        }
    }

    async fn try_submit(&self, board: &Board) -> Result<Post, SubmitError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(SubmitError::MissingFields);
        }

        Ok(board
            .create(&self.title, &self.content, self.file.as_ref())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::media::MediaStore;
    use crate::store::{KeyValueRepository, MemoryStore};
    use tempfile::TempDir;

    async fn board() -> (Board, Arc<MemoryStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let kv = Arc::new(MemoryStore::new());
        let repo = Arc::new(KeyValueRepository::new(kv.clone(), "forumPosts"));
        let board = Board::open(repo, MediaStore::new(dir.path().join("media"))).await;
        (board, kv, dir)
    }

    fn image() -> SelectedFile {
        SelectedFile::new("cat.png", Some("image/png".to_string()), b"png-bytes".to_vec())
    }

    #[tokio::test]
    async fn test_submit_clears_draft() {
        let (board, _kv, _dir) = board().await;
        board.set_banner("old problem").await;
        let mut draft = Draft::new().with_title("Hello").with_content("World");
        draft.error = Some("stale".to_string());

        let post = draft.submit(&board).await.unwrap();

        assert_eq!(post.title, "Hello");
        assert!(draft.is_empty());
        assert!(draft.error.is_none());
        assert!(board.banner().await.is_none());
        assert_eq!(board.posts().await, vec![post]);
    }

    #[tokio::test]
    async fn test_submit_requires_title_and_content() {
        let (board, _kv, _dir) = board().await;
        let mut draft = Draft::new().with_title("   ").with_content("body");

        let err = draft.submit(&board).await.unwrap_err();

        assert!(matches!(err, SubmitError::MissingFields));
        assert_eq!(draft.title, "   ");
        assert_eq!(draft.content, "body");
        assert!(draft.error.is_some());
        assert!(board.posts().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_media() {
        let (board, _kv, dir) = board().await;
        let mut draft = Draft::new().with_title("pic").with_content("look");
        draft.select_file(image());

        let post = draft.submit(&board).await.unwrap();

        let reference = post.media.unwrap();
        assert!(reference.starts_with("/media/") && reference.ends_with(".png"));
        let name = reference.trim_start_matches("/media/");
        assert!(dir.path().join("media").join(name).exists());
        assert!(draft.file.is_none());
    }

    #[tokio::test]
    async fn test_select_file_replaces_previous() {
        let mut draft = Draft::new();
        draft.select_file(image());
        draft.select_file(SelectedFile::new("notes.pdf", None, b"pdf".to_vec()));
        assert_eq!(draft.file.unwrap().file_name, "notes.pdf");
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_fields_and_removes_media() {
        let (board, kv, dir) = board().await;
        kv.set_fail_writes(true);
        let mut draft = Draft::new().with_title("pic").with_content("look");
        draft.select_file(image());
        let before = draft.clone();

        let err = draft.submit(&board).await.unwrap_err();

        assert!(matches!(err, SubmitError::Persist(_)));
        assert_eq!(draft.title, before.title);
        assert_eq!(draft.content, before.content);
        assert_eq!(draft.file, before.file);
        assert_eq!(draft.error.as_deref(), Some(PERSIST_FAILED_MESSAGE));
        assert!(board.posts().await.is_empty());
        assert_eq!(board.banner().await.as_deref(), Some(PERSIST_FAILED_MESSAGE));

        let stored = std::fs::read_dir(dir.path().join("media")).unwrap().count();
        assert_eq!(stored, 0, "orphaned media should be removed");
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_shared_media() {
        let (board, kv, dir) = board().await;
        let mut first = Draft::new().with_title("a").with_content("A");
        first.select_file(image());
        let existing = first.submit(&board).await.unwrap().media.unwrap();

        kv.set_fail_writes(true);
        let mut second = Draft::new().with_title("b").with_content("B");
        second.select_file(image());
        assert!(second.submit(&board).await.is_err());

        let name = existing.trim_start_matches("/media/");
        assert!(dir.path().join("media").join(name).exists());
    }
}
