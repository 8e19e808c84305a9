//! Pipeline configuration.

use adgen_cache::CANONICAL_PROVIDER;
use adgen_models::DEFAULT_MAX_PROMPT_LENGTH;

/// Flat per-scene production cost used by the fallback estimator.
pub const DEFAULT_COST_PER_SCENE: f64 = 0.35;

/// Flat audio production cost used by the fallback estimator.
pub const DEFAULT_COST_AUDIO_FLAT: f64 = 0.50;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Provider tried first when the request names none
    pub default_provider: String,
    pub max_prompt_length: usize,
    pub cost_per_scene: f64,
    pub cost_audio_flat: f64,
    pub currency: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_provider: CANONICAL_PROVIDER.to_string(),
            max_prompt_length: DEFAULT_MAX_PROMPT_LENGTH,
            cost_per_scene: DEFAULT_COST_PER_SCENE,
            cost_audio_flat: DEFAULT_COST_AUDIO_FLAT,
            currency: "USD".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_provider: std::env::var("DEFAULT_LLM_PROVIDER")
                .ok()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.default_provider),
            max_prompt_length: std::env::var("MAX_PROMPT_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_prompt_length),
            cost_per_scene: std::env::var("COST_PER_SCENE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.cost_per_scene),
            cost_audio_flat: std::env::var("COST_AUDIO_FLAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.cost_audio_flat),
            currency: defaults.currency,
        }
    }
}
