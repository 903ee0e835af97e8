//! Base layout components for the web UI.
//!
//! This module provides the page skeleton: head, header and footer.

use maud::{html, Markup, DOCTYPE};

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("Board").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
}

impl<'a> BaseLayout<'a> {
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="color-scheme" content="light dark";
                    title { (self.title) " - Forum Board" }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    header class="container" {
                        nav {
                            a href="/" { strong class="site-logo" { "Forum Board" } }
                        }
                    }
                    main class="container" {
                        (content)
                    }
                    footer class="container" {
                        small {
                            "Forum Board | "
                            a href="/api/posts" { "JSON" }
                        }
                    }
                }
            }
        }
    }
}
