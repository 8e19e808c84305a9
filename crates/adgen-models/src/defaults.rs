//! Smart-default documents.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::extraction::{Category, Platform};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TechnicalDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    pub aspect_ratio: String,
    /// Target duration in seconds
    pub duration: f64,
    pub fps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PacingDefaults {
    pub style: String,
    pub cuts_per_minute: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VisualDefaults {
    pub transition_style: String,
    pub lighting_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioDefaults {
    pub music_genre: String,
}

/// Defaults applied to a request, plus which fields were defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Defaults {
    pub technical: TechnicalDefaults,
    pub pacing: PacingDefaults,
    pub visual: VisualDefaults,
    pub audio: AudioDefaults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Dotted creative-direction paths that received a default value
    pub defaulted_fields: Vec<String>,
}

impl Defaults {
    /// Creative-direction paths and the values these defaults assign to them.
    ///
    /// Order is stable so that fill-in and reporting are deterministic.
    pub fn field_values(&self) -> Vec<(&'static str, Value)> {
        let mut fields = vec![
            ("technical_specs.duration", json!(self.technical.duration)),
            ("technical_specs.aspect_ratio", json!(self.technical.aspect_ratio)),
            ("technical_specs.fps", json!(self.technical.fps)),
        ];
        if let Some(platform) = self.technical.platform {
            fields.push(("technical_specs.platform", json!(platform.as_str())));
        }
        fields.extend([
            ("pacing.style", json!(self.pacing.style)),
            ("pacing.cuts_per_minute", json!(self.pacing.cuts_per_minute)),
            ("visual_direction.transition_style", json!(self.visual.transition_style)),
            ("visual_direction.lighting_style", json!(self.visual.lighting_style)),
            ("audio_direction.music_genre", json!(self.audio.music_genre)),
        ]);
        fields
    }
}
