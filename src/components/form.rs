//! Form components for maud templates.
//!
//! This module provides the form elements used by the compose form.

use maud::{html, Markup, Render};

/// A form container element.
#[derive(Debug)]
pub struct Form<'a> {
    /// Form action URL
    pub action: &'a str,
    /// HTTP method ("get" or "post")
    pub method: &'a str,
    /// Form content (inputs, buttons, etc.)
    pub content: Markup,
    /// Optional form ID
    pub id: Option<&'a str>,
    /// Enable multipart/form-data encoding
    pub multipart: bool,
}

impl<'a> Form<'a> {
    /// Create a POST form.
    #[must_use]
    pub fn post(action: &'a str, content: Markup) -> Self {
        Self {
            action,
            method: "post",
            content,
            id: None,
            multipart: false,
        }
    }

    /// Set the form ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    /// Enable multipart/form-data encoding (for file uploads).
    #[must_use]
    pub fn multipart(mut self) -> Self {
        self.multipart = true;
        self
    }
}

impl Render for Form<'_> {
    fn render(&self) -> Markup {
        html! {
            form
                action=(self.action)
                method=(self.method)
                id=[self.id]
                enctype=[self.multipart.then_some("multipart/form-data")]
            {
                (self.content)
            }
        }
    }
}

/// An input element.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    /// Input name attribute
    pub name: &'a str,
    /// Input type ("text", "file", ...)
    pub r#type: &'a str,
    /// Current value
    pub value: Option<&'a str>,
    /// Placeholder text
    pub placeholder: Option<&'a str>,
    /// Whether the field is required
    pub required: bool,
    /// Optional ID attribute
    pub id: Option<&'a str>,
    /// Accepted file types; advisory only, browsers may ignore it
    pub accept: Option<&'a str>,
}

impl<'a> Input<'a> {
    /// Create a new input with the given name and type.
    #[must_use]
    pub fn new(name: &'a str, r#type: &'a str) -> Self {
        Self {
            name,
            r#type,
            value: None,
            placeholder: None,
            required: false,
            id: None,
            accept: None,
        }
    }

    /// Create a text input.
    #[must_use]
    pub fn text(name: &'a str) -> Self {
        Self::new(name, "text")
    }

    /// Create a file input.
    #[must_use]
    pub fn file(name: &'a str) -> Self {
        Self::new(name, "file")
    }

    /// Set the value.
    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Mark as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the accept filter of a file input.
    #[must_use]
    pub fn accept(mut self, accept: &'a str) -> Self {
        self.accept = Some(accept);
        self
    }
}

impl Render for Input<'_> {
    fn render(&self) -> Markup {
        html! {
            input
                type=(self.r#type)
                name=(self.name)
                value=[self.value]
                placeholder=[self.placeholder]
                required[self.required]
                id=[self.id]
                accept=[self.accept];
        }
    }
}

/// A textarea element.
#[derive(Debug)]
pub struct TextArea<'a> {
    /// Textarea name attribute
    pub name: &'a str,
    /// Current value/content
    pub value: Option<&'a str>,
    /// Placeholder text
    pub placeholder: Option<&'a str>,
    /// Number of visible rows
    pub rows: Option<u32>,
    /// Whether the field is required
    pub required: bool,
    /// Optional ID attribute
    pub id: Option<&'a str>,
}

impl<'a> TextArea<'a> {
    /// Create a new textarea with the given name.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            value: None,
            placeholder: None,
            rows: None,
            required: false,
            id: None,
        }
    }

    /// Set the value/content.
    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the number of rows.
    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Mark as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for TextArea<'_> {
    fn render(&self) -> Markup {
        html! {
            textarea
                name=(self.name)
                placeholder=[self.placeholder]
                rows=[self.rows]
                required[self.required]
                id=[self.id]
            {
                @if let Some(value) = self.value {
                    (value)
                }
            }
        }
    }
}

/// A form group containing a label and its input.
#[derive(Debug)]
pub struct FormGroup<'a> {
    /// Label text
    pub label: &'a str,
    /// Input ID (also used for label's `for` attribute)
    pub id: &'a str,
    /// The input element
    pub input: Markup,
}

impl<'a> FormGroup<'a> {
    /// Create a new form group.
    #[must_use]
    pub fn new(label: &'a str, id: &'a str, input: Markup) -> Self {
        Self {
            label,
            id,
            input,
        }
    }
}

impl Render for FormGroup<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="form-group" {
                label for=(self.id) { (self.label) }
                (self.input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_form() {
        let html = Form::post("/posts", html! { "x" })
            .multipart()
            .id("compose")
            .render()
            .into_string();
        assert!(html.contains("action=\"/posts\""));
        assert!(html.contains("method=\"post\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("id=\"compose\""));
    }

    #[test]
    fn test_plain_form_has_no_enctype() {
        let html = Form::post("/x", html! {}).render().into_string();
        assert!(!html.contains("enctype"));
    }

    #[test]
    fn test_text_input_with_value() {
        let html = Input::text("title")
            .id("title")
            .value("Hello \"world\"")
            .required()
            .render()
            .into_string();
        assert!(html.contains("type=\"text\""));
        assert!(html.contains("name=\"title\""));
        assert!(html.contains("value=\"Hello &quot;world&quot;\""));
        assert!(html.contains("required"));
    }

    #[test]
    fn test_file_input_accept() {
        let html = Input::file("media")
            .accept("image/*,video/*")
            .render()
            .into_string();
        assert!(html.contains("type=\"file\""));
        assert!(html.contains("accept=\"image/*,video/*\""));
    }

    #[test]
    fn test_textarea_value() {
        let html = TextArea::new("content")
            .rows(4)
            .value("line <b>")
            .render()
            .into_string();
        assert!(html.contains("rows=\"4\""));
        assert!(html.contains("line &lt;b&gt;</textarea>"));
    }

    #[test]
    fn test_form_group() {
        let html = FormGroup::new("Title", "title", Input::text("title").id("title").render())
            .render()
            .into_string();
        assert!(html.contains("<div class=\"form-group\">"));
        assert!(html.contains("<label for=\"title\">Title</label>"));
    }
}
