//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout
//! - `alert`: The banner message
//! - `button`: Buttons, including single-button POST forms
//! - `card`: Post cards and the post list
//! - `form`: Form elements and input components
//! - `media`: Video and image display for attachments

pub mod alert;
pub mod button;
pub mod card;
pub mod form;
pub mod layout;
pub mod media;

pub use alert::Alert;
pub use button::{Button, ButtonVariant};
pub use card::{format_timestamp, EmptyState, PostCard, PostList};
pub use form::{Form, FormGroup, Input, TextArea};
pub use layout::BaseLayout;
pub use media::{ImageViewer, PostMedia, VideoPlayer};
