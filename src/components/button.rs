//! Button component for the web UI.
//!
//! Renders a `<button>`. Buttons that change state are submit buttons inside
//! a small POST form; see [`Button::post_action`].

use maud::{html, Markup, Render};

/// Button style variants matching CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary button (default) - `.btn-primary`
    #[default]
    Primary,
    /// Outline button - `.btn.outline`
    Outline,
    /// Ghost button (no background, minimal styling)
    Ghost,
}

impl ButtonVariant {
    /// Returns the CSS class(es) for this variant.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Outline => "btn outline",
            Self::Ghost => "btn btn-ghost",
        }
    }
}

/// A configurable button component.
///
/// # Example
///
/// ```ignore
/// use crate::components::button::Button;
///
/// let like = Button::outline("♥ 3").post_action("/posts/17/like");
/// let flag = Button::ghost("Flag").aria_label("Flag post");
/// ```
#[derive(Debug, Clone)]
pub struct Button<'a> {
    /// Button label text
    pub label: &'a str,
    /// Button style variant
    pub variant: ButtonVariant,
    /// Button type attribute
    pub r#type: Option<&'a str>,
    /// Additional CSS classes
    pub class: Option<&'a str>,
    /// Accessible label when the visible label is terse
    pub aria_label: Option<&'a str>,
    /// When set, the button is wrapped in a POST form targeting this URL
    pub action: Option<&'a str>,
}

impl<'a> Button<'a> {
    /// Creates a new button with the given label and variant.
    #[must_use]
    pub fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            r#type: None,
            class: None,
            aria_label: None,
            action: None,
        }
    }

    #[must_use]
    pub fn primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Primary)
    }

    #[must_use]
    pub fn outline(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Outline)
    }

    #[must_use]
    pub fn ghost(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Ghost)
    }

    /// Sets the button type attribute.
    #[must_use]
    pub fn r#type(mut self, r#type: &'a str) -> Self {
        self.r#type = Some(r#type);
        self
    }

    /// Adds additional CSS classes.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub fn aria_label(mut self, label: &'a str) -> Self {
        self.aria_label = Some(label);
        self
    }

    /// Submit a POST to `action` when clicked.
    #[must_use]
    pub fn post_action(mut self, action: &'a str) -> Self {
        self.action = Some(action);
        self
    }

    /// Builds the full CSS class string.
    fn build_class(&self) -> String {
        let mut classes = self.variant.class().to_string();
        if let Some(extra) = self.class {
            classes.push(' ');
            classes.push_str(extra);
        }
        classes
    }

    fn render_button(&self, default_type: &str) -> Markup {
        html! {
            button
                class=(self.build_class())
                type=(self.r#type.unwrap_or(default_type))
                aria-label=[self.aria_label]
            {
                (self.label)
            }
        }
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        match self.action {
            Some(action) => html! {
                form class="inline-form" action=(action) method="post" {
                    (self.render_button("submit"))
                }
            },
            None => self.render_button("button"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_button() {
        let html = Button::primary("Post").render().into_string();
        assert!(html.contains("btn btn-primary"));
        assert!(html.contains("Post"));
        assert!(html.contains("type=\"button\""));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_post_action_wraps_in_form() {
        let html = Button::outline("Like")
            .post_action("/posts/5/like")
            .render()
            .into_string();
        assert!(html.contains("<form"));
        assert!(html.contains("action=\"/posts/5/like\""));
        assert!(html.contains("method=\"post\""));
        assert!(html.contains("type=\"submit\""));
    }

    #[test]
    fn test_button_with_extra_class_and_label() {
        let html = Button::ghost("⚑")
            .class("flag")
            .aria_label("Flag post")
            .render()
            .into_string();
        assert!(html.contains("btn btn-ghost flag"));
        assert!(html.contains("aria-label=\"Flag post\""));
    }

    #[test]
    fn test_explicit_type() {
        let html = Button::primary("Submit").r#type("submit").render().into_string();
        assert!(html.contains("type=\"submit\""));
    }
}
