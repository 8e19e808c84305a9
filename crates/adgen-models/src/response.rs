//! Parse response models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::direction::CreativeDirection;
use crate::reference::ReferenceSummary;
use crate::scene::Scene;

/// Per-dimension confidence sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceBreakdown {
    pub product_understanding: f64,
    pub style_clarity: f64,
    pub technical_feasibility: f64,
}

/// Transparency block attached to every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResponseMetadata {
    pub cache_hit: bool,
    pub defaults_used: Vec<String>,
    pub warnings: Vec<String>,
    pub confidence_score: f64,
    pub confidence_breakdown: ConfidenceBreakdown,
    /// Name of the provider whose completion was used
    #[serde(
        rename = "llm_provider_used",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_used: Option<String>,
}

/// Itemised fallback cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CostBreakdown {
    pub scenes: f64,
    pub audio: f64,
}

/// Rule-based cost projection used when the caller supplies none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CostEstimate {
    pub total: f64,
    pub currency: String,
    pub scene_count: u32,
    pub per_scene_cost: f64,
    pub breakdown: CostBreakdown,
    /// Always `"low"` for fallback estimates
    pub confidence: String,
    pub source: String,
}

impl CostEstimate {
    /// Human-readable one-line summary.
    pub fn to_description(&self) -> String {
        let scene_text = if self.scene_count == 1 { "scene" } else { "scenes" };
        if self.breakdown.audio > 0.0 {
            format!(
                "{} {} at {:.2} + audio {:.2} = {:.2} {}",
                self.scene_count,
                scene_text,
                self.per_scene_cost,
                self.breakdown.audio,
                self.total,
                self.currency
            )
        } else {
            format!(
                "{} {} at {:.2} = {:.2} {}",
                self.scene_count, scene_text, self.per_scene_cost, self.total, self.currency
            )
        }
    }
}

/// Successful parse result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParseResponse {
    /// Always `"success"`
    pub status: String,
    pub creative_direction: CreativeDirection,
    pub scenes: Vec<Scene>,
    pub metadata: ResponseMetadata,
    /// Caller-supplied estimate, or a serialized [`CostEstimate`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_references: Option<ReferenceSummary>,
}

impl ParseResponse {
    pub const STATUS_SUCCESS: &'static str = "success";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(provider: Option<&str>) -> ResponseMetadata {
        ResponseMetadata {
            cache_hit: false,
            defaults_used: vec!["technical_specs.fps".to_string()],
            warnings: vec![],
            confidence_score: 0.75,
            confidence_breakdown: ConfidenceBreakdown {
                product_understanding: 0.7,
                style_clarity: 0.6,
                technical_feasibility: 1.0,
            },
            provider_used: provider.map(str::to_string),
        }
    }

    #[test]
    fn test_provider_field_name() {
        let json = serde_json::to_value(metadata(Some("openai"))).unwrap();
        assert_eq!(json["llm_provider_used"], "openai");

        let json = serde_json::to_value(metadata(None)).unwrap();
        assert!(json.get("llm_provider_used").is_none());
    }

    #[test]
    fn test_cost_description() {
        let estimate = CostEstimate {
            total: 2.6,
            currency: "USD".to_string(),
            scene_count: 6,
            per_scene_cost: 0.35,
            breakdown: CostBreakdown {
                scenes: 2.1,
                audio: 0.5,
            },
            confidence: "low".to_string(),
            source: "fallback".to_string(),
        };
        assert_eq!(
            estimate.to_description(),
            "6 scenes at 0.35 + audio 0.50 = 2.60 USD"
        );
    }
}
