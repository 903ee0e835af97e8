use serde::{Deserialize, Serialize};

use crate::constants::{ANONYMOUS_AUTHOR, VIDEO_EXTENSIONS};

/// A single board entry as stored in the persisted collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    /// RFC 3339 creation time in UTC.
    pub created_at: String,
    pub likes: u64,
    /// Always 0; there is no way to reply.
    pub replies: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl Post {
    /// Build a freshly created post with zeroed counters.
    #[must_use]
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: impl Into<String>,
        media: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author: ANONYMOUS_AUTHOR.to_string(),
            created_at: created_at.into(),
            likes: 0,
            replies: 0,
            media,
        }
    }
}

/// Classify a media reference by its file extension.
#[must_use]
pub fn is_video_reference(reference: &str) -> bool {
    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    let Some((_, extension)) = path.rsplit_once('.') else {
        return false;
    };
    let extension = extension.to_lowercase();
    VIDEO_EXTENSIONS.contains(&extension.as_str())
}
