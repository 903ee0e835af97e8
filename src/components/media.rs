//! Media display components for post attachments.

use maud::{html, Markup, Render};

use crate::store::is_video_reference;

/// Video player component with responsive wrapper.
#[derive(Debug, Clone)]
pub struct VideoPlayer<'a> {
    /// Source URL for the video
    pub src: &'a str,
}

impl<'a> VideoPlayer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    /// Infer the video MIME type from the source URL extension.
    fn inferred_type(&self) -> &'static str {
        let extension = self.src.rsplit('.').next().unwrap_or("").to_lowercase();

        match extension.as_str() {
            "webm" => "video/webm",
            "mkv" => "video/x-matroska",
            "mov" => "video/quicktime",
            "ogg" | "ogv" => "video/ogg",
            _ => "video/mp4",
        }
    }
}

impl Render for VideoPlayer<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="media-container" {
                video controls preload="metadata" {
                    source src=(self.src) type=(self.inferred_type());
                    "Your browser does not support the video tag."
                }
            }
        }
    }
}

/// Image viewer component.
#[derive(Debug, Clone)]
pub struct ImageViewer<'a> {
    /// Source URL for the image
    pub src: &'a str,
    /// Alt text for accessibility
    pub alt: &'a str,
}

impl<'a> ImageViewer<'a> {
    #[must_use]
    pub fn new(src: &'a str, alt: &'a str) -> Self {
        Self { src, alt }
    }
}

impl Render for ImageViewer<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="media-container" {
                img src=(self.src) alt=(self.alt) loading="lazy";
            }
        }
    }
}

/// A post attachment: a video when the reference has a video extension,
/// otherwise an image.
#[derive(Debug, Clone)]
pub struct PostMedia<'a> {
    pub reference: &'a str,
    pub alt: &'a str,
}

impl<'a> PostMedia<'a> {
    #[must_use]
    pub fn new(reference: &'a str, alt: &'a str) -> Self {
        Self { reference, alt }
    }
}

impl Render for PostMedia<'_> {
    fn render(&self) -> Markup {
        if is_video_reference(self.reference) {
            VideoPlayer::new(self.reference).render()
        } else {
            ImageViewer::new(self.reference, self.alt).render()
        }
    }
}
