//! Post cards and the post list.

use chrono::{DateTime, Utc};
use maud::{html, Markup, Render};

use crate::components::button::Button;
use crate::components::media::PostMedia;
use crate::store::Post;

/// Format an RFC 3339 timestamp for display, e.g. `Jan 5, 2024 14:03 UTC`.
///
/// Unparseable values are shown as stored.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |dt| dt.with_timezone(&Utc).format("%b %-d, %Y %H:%M UTC").to_string(),
    )
}

/// A single post with its like action, reply count and flag button.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Post,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let like_action = format!("/posts/{}/like", post.id);
        let like_label = format!("♥ {}", post.likes);

        html! {
            article class="post-card" id=(format!("post-{}", post.id)) {
                h3 class="post-title" { (post.title) }
                p class="post-content" { (post.content) }
                @if let Some(reference) = post.media.as_deref() {
                    (PostMedia::new(reference, &post.title))
                }
                footer class="post-meta" {
                    span class="author" { "by " (post.author) }
                    " · "
                    time datetime=(post.created_at) { (format_timestamp(&post.created_at)) }
                    div class="post-actions" {
                        (Button::outline(&like_label)
                            .class("like")
                            .aria_label("Like post")
                            .post_action(&like_action))
                        span class="replies" { "💬 " (post.replies) }
                        (Button::ghost("⚑").class("flag").aria_label("Flag post"))
                    }
                }
            }
        }
    }
}

/// All posts, in the order given (newest first).
#[derive(Debug, Clone)]
pub struct PostList<'a> {
    pub posts: &'a [Post],
}

impl<'a> PostList<'a> {
    #[must_use]
    pub const fn new(posts: &'a [Post]) -> Self {
        Self { posts }
    }
}

impl Render for PostList<'_> {
    fn render(&self) -> Markup {
        if self.posts.is_empty() {
            return EmptyState::no_posts().render();
        }
        html! {
            section class="post-list" {
                @for post in self.posts {
                    (PostCard::new(post))
                }
            }
        }
    }
}

/// An empty state component for when there are no posts.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
}

impl<'a> EmptyState<'a> {
    #[must_use]
    pub const fn no_posts() -> Self {
        Self {
            message: "No posts yet. Start the discussion!",
        }
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            p class="empty-state" { (self.message) }
        }
    }
}
