//! Visual reference summaries produced by input analysis.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::direction::StyleSource;

/// How a media reference was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Url,
    Inline,
}

/// Metadata about one image or video reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MediaReference {
    pub kind: ReferenceKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Decoded size for inline references
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Summary of the visual inputs and the modality chosen as style authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceSummary {
    pub style_source: StyleSource,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<MediaReference>,

    /// Human-readable notes fed into the prompt
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ReferenceSummary {
    /// Summary for a text-only request.
    pub fn text_only() -> Self {
        Self {
            style_source: StyleSource::Text,
            image: None,
            video: None,
            notes: Vec::new(),
        }
    }

    pub fn has_references(&self) -> bool {
        self.image.is_some() || self.video.is_some()
    }
}
