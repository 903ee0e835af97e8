//! Shared constants used across the application.

/// Author recorded on every post. There is no user identity.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Storage key holding the serialized post collection.
pub const DEFAULT_STORAGE_KEY: &str = "forumPosts";

/// Default upper bound for an attached media file (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// URL prefix under which stored media files are served.
pub const MEDIA_URL_PREFIX: &str = "/media/";

/// File extensions rendered as `<video>` rather than `<img>`.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "ogv", "mov", "m4v", "mkv"];

/// Banner shown when the saved collection cannot be read.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load saved posts. Starting with an empty board.";

/// Banner shown when a mutation could not be written to storage.
pub const PERSIST_FAILED_MESSAGE: &str =
    "Could not save your change. Storage may be full; please try again.";
