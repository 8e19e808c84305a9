//! Scene models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Narrative role of a scene within the ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScenePurpose {
    /// Opening attention grabber
    Hook,
    Problem,
    Solution,
    ProductShowcase,
    Feature,
    Benefit,
    SocialProof,
    Lifestyle,
    /// Closing call-to-action
    Cta,
}

impl ScenePurpose {
    pub const ALL: &'static [ScenePurpose] = &[
        ScenePurpose::Hook,
        ScenePurpose::Problem,
        ScenePurpose::Solution,
        ScenePurpose::ProductShowcase,
        ScenePurpose::Feature,
        ScenePurpose::Benefit,
        ScenePurpose::SocialProof,
        ScenePurpose::Lifestyle,
        ScenePurpose::Cta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenePurpose::Hook => "hook",
            ScenePurpose::Problem => "problem",
            ScenePurpose::Solution => "solution",
            ScenePurpose::ProductShowcase => "product_showcase",
            ScenePurpose::Feature => "feature",
            ScenePurpose::Benefit => "benefit",
            ScenePurpose::SocialProof => "social_proof",
            ScenePurpose::Lifestyle => "lifestyle",
            ScenePurpose::Cta => "cta",
        }
    }
}

impl fmt::Display for ScenePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single timed scene of the ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// 1-based position in the sequence
    #[serde(alias = "id", alias = "number")]
    pub scene_number: u32,

    pub purpose: ScenePurpose,

    /// Duration in seconds, strictly positive
    pub duration: f64,

    pub visual_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_movement: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_cue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlay: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

impl Scene {
    /// Total duration of a scene sequence.
    pub fn total_duration(scenes: &[Scene]) -> f64 {
        scenes.iter().map(|s| s.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_accepts_id_alias() {
        let scene: Scene = serde_json::from_str(
            r#"{"id": 2, "purpose": "product_showcase", "duration": 4.5, "visual_description": "Close-up"}"#,
        )
        .unwrap();
        assert_eq!(scene.scene_number, 2);
        assert_eq!(scene.purpose, ScenePurpose::ProductShowcase);
        assert!(scene.text_overlay.is_none());
    }

    #[test]
    fn test_unknown_purpose_rejected() {
        let result: Result<Scene, _> = serde_json::from_str(
            r#"{"scene_number": 1, "purpose": "outro", "duration": 3, "visual_description": "x"}"#,
        );
        assert!(result.is_err());
    }
}
