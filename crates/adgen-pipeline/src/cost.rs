//! Rule-based fallback cost estimation.

use adgen_models::{CostBreakdown, CostEstimate};

use crate::config::PipelineConfig;

pub const FALLBACK_CONFIDENCE: &str = "low";
pub const FALLBACK_SOURCE: &str = "fallback";

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flat-rate estimate: per-scene cost plus a fixed audio charge.
pub fn estimate(scene_count: usize, includes_audio: bool, config: &PipelineConfig) -> CostEstimate {
    let scenes = round2(scene_count as f64 * config.cost_per_scene);
    let audio = if includes_audio {
        round2(config.cost_audio_flat)
    } else {
        0.0
    };

    CostEstimate {
        total: round2(scenes + audio),
        currency: config.currency.clone(),
        scene_count: scene_count as u32,
        per_scene_cost: config.cost_per_scene,
        breakdown: CostBreakdown { scenes, audio },
        confidence: FALLBACK_CONFIDENCE.to_string(),
        source: FALLBACK_SOURCE.to_string(),
    }
}
