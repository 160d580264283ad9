//! Pure renderers from [`OutlineDocument`] to report text.
//!
//! None of them mutate the document, so they can run concurrently over a
//! shared reference.

pub mod json;
pub mod markdown;
pub mod text;

use crate::domain::errors::OutlineResult;
use crate::domain::models::OutlineDocument;

pub use json::render_json;
pub use markdown::{render_markdown, slugify};
pub use text::render_text;

/// Timestamp layout shared by the Markdown and text reports
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// The three report representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Json,
    Markdown,
    Text,
}

impl ReportFormat {
    pub const ALL: [Self; 3] = [Self::Json, Self::Markdown, Self::Text];

    /// Fixed artifact name written into the scan root
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Json => "driver_outline.json",
            Self::Markdown => "driver_outline.md",
            Self::Text => "driver_outline.txt",
        }
    }

    pub fn render(self, document: &OutlineDocument) -> OutlineResult<String> {
        match self {
            Self::Json => render_json(document),
            Self::Markdown => Ok(render_markdown(document)),
            Self::Text => Ok(render_text(document)),
        }
    }
}
