//! The board page: banner, compose form and the post list.

use maud::{html, Markup, Render};

use crate::components::{Alert, BaseLayout, Button, Form, FormGroup, Input, PostList, TextArea};
use crate::draft::Draft;
use crate::store::Post;

const MEDIA_ACCEPT: &str = "image/*,video/*";
const DOCUMENT_ACCEPT: &str = ".pdf,.doc,.docx,.txt,.md";

/// Parameters for rendering the board page.
#[derive(Debug, Clone, Copy)]
pub struct BoardPageParams<'a> {
    /// Current collection, newest first.
    pub posts: &'a [Post],
    /// Compose form contents to show back to the user.
    pub draft: &'a Draft,
    /// Banner message replacing any other message.
    pub banner: Option<&'a str>,
}

impl<'a> BoardPageParams<'a> {
    #[must_use]
    pub fn new(posts: &'a [Post], draft: &'a Draft) -> Self {
        Self {
            posts,
            draft,
            banner: None,
        }
    }

    #[must_use]
    pub fn banner(mut self, banner: Option<&'a str>) -> Self {
        self.banner = banner;
        self
    }
}

/// Render the complete board page.
#[must_use]
pub fn render_board_page(params: &BoardPageParams<'_>) -> Markup {
    let content = html! {
        h1 { "Discussion Board" }

        @if let Some(message) = params.banner {
            (Alert::error(message))
        }

        (ComposeForm { draft: params.draft })

        h2 { "Posts" }
        (PostList::new(params.posts))
    };

    BaseLayout::new("Board").render(content)
}

/// The compose form, pre-filled from a draft.
struct ComposeForm<'a> {
    draft: &'a Draft,
}

impl Render for ComposeForm<'_> {
    fn render(&self) -> Markup {
        let draft = self.draft;
        let fields = html! {
            (FormGroup::new(
                "Title",
                "title",
                Input::text("title")
                    .id("title")
                    .placeholder("What is this about?")
                    .value(&draft.title)
                    .required()
                    .render(),
            ))
            (FormGroup::new(
                "Content",
                "content",
                TextArea::new("content")
                    .id("content")
                    .rows(5)
                    .placeholder("Share your thoughts...")
                    .value(&draft.content)
                    .required()
                    .render(),
            ))
            div class="attachments" {
                (FormGroup::new(
                    "Image or video",
                    "media",
                    Input::file("media").id("media").accept(MEDIA_ACCEPT).render(),
                ))
                (FormGroup::new(
                    "Document",
                    "document",
                    Input::file("document").id("document").accept(DOCUMENT_ACCEPT).render(),
                ))
                @if let Some(file) = &draft.file {
                    small class="previous-file" {
                        "Previously selected: " (file.file_name) ". Please select it again."
                    }
                }
            }
            (Button::primary("Post").r#type("submit"))
        };

        html! {
            section class="compose" {
                (Form::post("/posts", fields).id("compose").multipart())
            }
        }
    }
}
