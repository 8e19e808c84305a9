//! Scene validation and deterministic scene generation.
//!
//! Provider scenes are trusted only as a whole: the first invalid element
//! discards the entire list and the generator takes over.

use serde_json::Value;

use adgen_models::{CreativeDirection, Defaults, Scene, ScenePurpose};

use crate::metrics;

pub const SCENES_AUTO_GENERATED: &str = "scenes auto-generated";
pub const SCENES_SCHEMA_MISMATCH: &str = "scenes regenerated: schema mismatch";
pub const SCENES_DURATION_MISMATCH: &str = "scenes regenerated: duration mismatch";

/// Allowed gap between the provider's scene total and the target duration.
pub const DURATION_TOLERANCE_SECS: f64 = 2.0;

pub const MIN_GENERATED_SCENES: usize = 3;
pub const MAX_GENERATED_SCENES: usize = 8;

/// Seconds of ad per generated scene, before clamping.
const SECONDS_PER_SCENE: f64 = 5.0;

const MIDDLE_PURPOSES: &[ScenePurpose] = &[
    ScenePurpose::Problem,
    ScenePurpose::Solution,
    ScenePurpose::ProductShowcase,
    ScenePurpose::Feature,
    ScenePurpose::Benefit,
    ScenePurpose::SocialProof,
];

const HOOK_WEIGHT: f64 = 0.8;
const MIDDLE_WEIGHT: f64 = 1.1;
const CTA_WEIGHT: f64 = 1.0;

/// Outcome of checking a provider scene list.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneVerdict {
    Valid(Vec<Scene>),
    /// `scenes` absent, null or empty
    Missing,
    /// First offending element and its errors
    Invalid { index: usize, errors: Vec<String> },
    DurationMismatch { expected: f64, actual: f64 },
}

/// Check one scene element. Returns the typed scene or every problem found.
pub fn validate_scene(value: &Value) -> Result<Scene, Vec<String>> {
    if !value.is_object() {
        return Err(vec!["scene must be a JSON object".to_string()]);
    }

    let scene: Scene = serde_json::from_value(value.clone()).map_err(|e| vec![e.to_string()])?;

    let mut errors = Vec::new();
    if scene.scene_number == 0 {
        errors.push("scene_number must be at least 1".to_string());
    }
    if !scene.duration.is_finite() || scene.duration <= 0.0 {
        errors.push(format!("duration must be positive, got {}", scene.duration));
    }
    if scene.visual_description.trim().is_empty() {
        errors.push("visual_description must not be blank".to_string());
    }

    if errors.is_empty() {
        Ok(scene)
    } else {
        Err(errors)
    }
}

/// Check a provider `scenes` value against the target duration.
pub fn validate_scenes(raw: Option<&Value>, target_duration: f64) -> SceneVerdict {
    let items = match raw {
        None | Some(Value::Null) => return SceneVerdict::Missing,
        Some(Value::Array(items)) if items.is_empty() => return SceneVerdict::Missing,
        Some(Value::Array(items)) => items,
        Some(_) => {
            return SceneVerdict::Invalid {
                index: 0,
                errors: vec!["scenes must be an array".to_string()],
            }
        }
    };

    let mut scenes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match validate_scene(item) {
            Ok(scene) => scenes.push(scene),
            Err(errors) => return SceneVerdict::Invalid { index, errors },
        }
    }

    let actual = Scene::total_duration(&scenes);
    if (actual - target_duration).abs() > DURATION_TOLERANCE_SECS {
        return SceneVerdict::DurationMismatch {
            expected: target_duration,
            actual,
        };
    }

    SceneVerdict::Valid(scenes)
}

/// Scene count for a target duration: one per five seconds, within 3..=8.
pub fn scene_count(target_duration: f64) -> usize {
    let raw = (target_duration / SECONDS_PER_SCENE).round();
    if raw.is_finite() && raw > 0.0 {
        (raw as usize).clamp(MIN_GENERATED_SCENES, MAX_GENERATED_SCENES)
    } else {
        MIN_GENERATED_SCENES
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Deterministic hook-to-CTA scene sequence summing to `target_duration`.
pub fn generate_scenes(
    target_duration: f64,
    product_name: Option<&str>,
    defaults: &Defaults,
) -> Vec<Scene> {
    let count = scene_count(target_duration);
    let product = product_name.unwrap_or("the product");

    let purposes: Vec<ScenePurpose> = std::iter::once(ScenePurpose::Hook)
        .chain(MIDDLE_PURPOSES.iter().copied().take(count - 2))
        .chain(std::iter::once(ScenePurpose::Cta))
        .collect();

    let weights: Vec<f64> = purposes
        .iter()
        .map(|p| match p {
            ScenePurpose::Hook => HOOK_WEIGHT,
            ScenePurpose::Cta => CTA_WEIGHT,
            _ => MIDDLE_WEIGHT,
        })
        .collect();
    let total_weight: f64 = weights.iter().sum();
    let unit = target_duration / total_weight;

    // Every scene but the last is rounded; the last absorbs the remainder.
    let mut durations: Vec<f64> = weights[..count - 1]
        .iter()
        .map(|w| round1(w * unit).max(0.1))
        .collect();
    let used: f64 = durations.iter().sum();
    durations.push(round2(target_duration - used).max(0.1));

    purposes
        .into_iter()
        .zip(durations)
        .enumerate()
        .map(|(i, (purpose, duration))| {
            build_scene(i as u32 + 1, purpose, duration, product, i + 1 == count, defaults)
        })
        .collect()
}

fn build_scene(
    scene_number: u32,
    purpose: ScenePurpose,
    duration: f64,
    product: &str,
    last: bool,
    defaults: &Defaults,
) -> Scene {
    let (visual_description, shot_type, camera_movement, text_overlay) = match purpose {
        ScenePurpose::Hook => (
            format!("Attention-grabbing opening that teases {}", product),
            "close_up",
            "push_in",
            None,
        ),
        ScenePurpose::Problem => (
            format!("Everyday frustration that {} solves", product),
            "medium",
            "handheld",
            None,
        ),
        ScenePurpose::Solution => (
            format!("{} enters and resolves the problem", product),
            "medium",
            "tracking",
            None,
        ),
        ScenePurpose::ProductShowcase => (
            format!("Hero shot of {} with detail inserts", product),
            "product_hero",
            "orbit",
            None,
        ),
        ScenePurpose::Feature => (
            format!("Key feature of {} demonstrated in use", product),
            "close_up",
            "slider",
            Some("Key feature".to_string()),
        ),
        ScenePurpose::Benefit => (
            format!("The payoff of using {} in real life", product),
            "wide",
            "static",
            None,
        ),
        ScenePurpose::SocialProof => (
            format!("Happy customers using {}", product),
            "medium",
            "handheld",
            Some("Loved by customers".to_string()),
        ),
        ScenePurpose::Lifestyle => (
            format!("{} fitting naturally into daily life", product),
            "wide",
            "tracking",
            None,
        ),
        ScenePurpose::Cta => (
            format!("End card with {} and a clear call to action", product),
            "product_hero",
            "static",
            Some("Shop now".to_string()),
        ),
    };

    Scene {
        scene_number,
        purpose,
        duration,
        visual_description,
        shot_type: Some(shot_type.to_string()),
        camera_movement: Some(camera_movement.to_string()),
        audio_cue: Some(defaults.audio.music_genre.clone()),
        text_overlay,
        transition: (!last).then(|| defaults.visual.transition_style.clone()),
    }
}

/// Scenes accepted or generated for a document, plus the warning to report.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneResolution {
    pub scenes: Vec<Scene>,
    pub warning: Option<&'static str>,
}

/// Validate the document's scenes, regenerating on absence or any violation,
/// and write the result back under `scenes`.
pub fn resolve_scenes(direction: &mut CreativeDirection, defaults: &Defaults) -> SceneResolution {
    let target = direction.duration().unwrap_or(defaults.technical.duration);

    let warning = match validate_scenes(direction.scenes(), target) {
        SceneVerdict::Valid(scenes) => {
            direction.set_scenes(&scenes);
            return SceneResolution {
                scenes,
                warning: None,
            };
        }
        SceneVerdict::Missing => {
            metrics::record_scene_regeneration("missing");
            SCENES_AUTO_GENERATED
        }
        SceneVerdict::Invalid { index, errors } => {
            tracing::warn!(
                index,
                errors = ?errors,
                "Provider scene failed validation, regenerating all scenes"
            );
            metrics::record_scene_regeneration("schema_mismatch");
            SCENES_SCHEMA_MISMATCH
        }
        SceneVerdict::DurationMismatch { expected, actual } => {
            tracing::warn!(
                expected,
                actual,
                "Provider scene durations do not match target, regenerating"
            );
            metrics::record_scene_regeneration("duration_mismatch");
            SCENES_DURATION_MISMATCH
        }
    };

    let scenes = generate_scenes(target, direction.product_name(), defaults);
    direction.set_scenes(&scenes);
    SceneResolution {
        scenes,
        warning: Some(warning),
    }
}
