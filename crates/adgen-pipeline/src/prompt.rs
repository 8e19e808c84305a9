//! Completion prompt assembly.
//!
//! Pure functions: the system prompt is fixed, the user prompt is built from
//! the request text and everything the pipeline derived from it.

use std::fmt::Write as _;
use std::sync::LazyLock;

use adgen_models::{CreativeDirection, Defaults, ExtractedParameters, ReferenceSummary, Scene};
use serde_json::Value;

/// Minimum and maximum scenes the provider is asked for.
pub const REQUESTED_SCENES_MIN: usize = 5;
pub const REQUESTED_SCENES_MAX: usize = 8;

static SYSTEM_PROMPT: LazyLock<String> = LazyLock::new(|| {
    let scene_schema = serde_json::to_string_pretty(&schemars::schema_for!(Scene))
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a senior creative director who turns ad briefs into production-ready \
creative direction.\n\
\n\
Respond with a single JSON object and nothing else. The object must contain these \
top-level keys:\n\
{sections}\n\
- scenes: an array of {min} to {max} scene objects\n\
\n\
Section contents:\n\
- product: name, category, description, key_benefits (array of strings)\n\
- technical_specs: duration (seconds, number), aspect_ratio, fps, platform\n\
- visual_direction: style, color_palette, lighting_style, transition_style\n\
- audio_direction: music_genre, voiceover (boolean), sound_effects\n\
- text_strategy: tone, headline, overlays\n\
- pacing: style, cuts_per_minute\n\
- cta: text, placement\n\
\n\
Scene rules: the first scene has purpose \"hook\", the last has purpose \"cta\", and \
scene durations add up to technical_specs.duration. Every scene must match this JSON \
schema:\n\
{schema}\n\
\n\
Keep any value stated in the brief. Use the supplied defaults only where the brief is \
silent.",
        sections = CreativeDirection::SECTIONS
            .iter()
            .map(|s| format!("- {}", s))
            .collect::<Vec<_>>()
            .join("\n"),
        min = REQUESTED_SCENES_MIN,
        max = REQUESTED_SCENES_MAX,
        schema = scene_schema,
    )
});

/// Fixed system prompt describing the required document shape.
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT.as_str()
}

/// Inputs to the user prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptParts<'a> {
    pub text: Option<&'a str>,
    pub params: &'a ExtractedParameters,
    pub defaults: &'a Defaults,
    pub visual: Option<&'a ReferenceSummary>,
    pub previous: Option<&'a Value>,
}

/// Build the user prompt with one labeled section per input.
pub fn build_user_prompt(parts: PromptParts<'_>) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "## Request");
    let _ = writeln!(
        prompt,
        "{}",
        parts.text.unwrap_or("(no text supplied; rely on the visual context)")
    );

    let params = parts.params;
    let _ = writeln!(prompt, "\n## Extracted parameters");
    let _ = writeln!(
        prompt,
        "- duration: {}",
        params
            .duration
            .map(|d| format!("{} seconds", d))
            .unwrap_or_else(|| "not specified".to_string())
    );
    let _ = writeln!(
        prompt,
        "- platform: {}",
        params.platform.map(|p| p.as_str()).unwrap_or("not specified")
    );
    let _ = writeln!(
        prompt,
        "- product: {}",
        params.product_name.as_deref().unwrap_or("not specified")
    );
    let _ = writeln!(
        prompt,
        "- style keywords: {}",
        if params.style_keywords.is_empty() {
            "none".to_string()
        } else {
            params.style_keywords.join(", ")
        }
    );

    let defaults = parts.defaults;
    let _ = writeln!(prompt, "\n## Defaults");
    if let Some(category) = defaults.category {
        let _ = writeln!(prompt, "- detected category: {}", category);
    }
    for (path, value) in defaults.field_values() {
        let _ = writeln!(prompt, "- {}: {}", path, value);
    }

    let _ = writeln!(prompt, "\n## Visual context");
    match parts.visual {
        Some(summary) => {
            let _ = writeln!(prompt, "- style source: {}", summary.style_source);
            for note in &summary.notes {
                let _ = writeln!(prompt, "- {}", note);
            }
        }
        None => {
            let _ = writeln!(prompt, "- none");
        }
    }

    if let Some(previous) = parts.previous {
        let _ = writeln!(prompt, "\n## Previous creative direction");
        let _ = writeln!(
            prompt,
            "Treat the request as an edit of this document. Change only what the request asks for."
        );
        let rendered =
            serde_json::to_string_pretty(previous).unwrap_or_else(|_| previous.to_string());
        let _ = writeln!(prompt, "{}", rendered);
    }

    prompt
}
