//! Alert component for the board's banner message.

use maud::{html, Markup, Render};

/// An error alert.
///
/// Renders as a styled article element carrying `role="alert"` so assistive
/// technology announces it.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self { message }
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            article class="error" role="alert" {
                (self.message)
            }
        }
    }
}
