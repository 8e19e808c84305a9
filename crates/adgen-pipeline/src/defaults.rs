//! Smart defaults: platform and category lookup tables.
//!
//! Defaults are computed from extracted parameters alone, so the same
//! extraction always yields the same defaults and defaulted-field list.
//! [`fill_missing`] writes them into a creative direction wherever the
//! document has no value yet.

use adgen_models::{
    AudioDefaults, Category, CreativeDirection, Defaults, ExtractedParameters, PacingDefaults,
    Platform, TechnicalDefaults, VisualDefaults,
};

/// Style keywords that mark a product as luxury.
pub const LUXURY_KEYWORDS: &[&str] = &["luxury", "luxurious", "premium", "elegant", "high-end", "exclusive"];

const TECH_MARKERS: &[&str] = &["tech", "app", "software"];
const FITNESS_MARKERS: &[&str] = &["fitness", "gym", "athletic"];

/// Per-platform technical and pacing profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformProfile {
    pub aspect_ratio: &'static str,
    pub duration: f64,
    pub fps: u32,
    pub pacing: &'static str,
    pub cuts_per_minute: u32,
}

/// Per-category creative profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub pacing: &'static str,
    pub transition_style: &'static str,
    pub lighting_style: &'static str,
    pub music_genre: &'static str,
}

const GENERIC_PLATFORM: PlatformProfile = PlatformProfile {
    aspect_ratio: "16:9",
    duration: 30.0,
    fps: 30,
    pacing: "moderate",
    cuts_per_minute: 15,
};

const GENERIC_CATEGORY: CategoryProfile = CategoryProfile {
    pacing: "moderate",
    transition_style: "cut",
    lighting_style: "natural",
    music_genre: "upbeat_pop",
};

pub fn platform_profile(platform: Option<Platform>) -> PlatformProfile {
    match platform {
        Some(Platform::Instagram) => PlatformProfile {
            aspect_ratio: "9:16",
            duration: 30.0,
            fps: 30,
            pacing: "fast",
            cuts_per_minute: 24,
        },
        Some(Platform::Tiktok) => PlatformProfile {
            aspect_ratio: "9:16",
            duration: 15.0,
            fps: 30,
            pacing: "very_fast",
            cuts_per_minute: 30,
        },
        Some(Platform::Youtube) => PlatformProfile {
            aspect_ratio: "16:9",
            duration: 60.0,
            fps: 24,
            pacing: "moderate",
            cuts_per_minute: 12,
        },
        None => GENERIC_PLATFORM,
    }
}

pub fn category_profile(category: Option<Category>) -> CategoryProfile {
    match category {
        Some(Category::Luxury) => CategoryProfile {
            pacing: "slow",
            transition_style: "dissolve",
            lighting_style: "soft_dramatic",
            music_genre: "ambient_orchestral",
        },
        Some(Category::Tech) => CategoryProfile {
            pacing: "moderate",
            transition_style: "cut",
            lighting_style: "clean_bright",
            music_genre: "electronic",
        },
        Some(Category::Fitness) => CategoryProfile {
            pacing: "fast",
            transition_style: "whip_pan",
            lighting_style: "high_contrast",
            music_genre: "upbeat_hiphop",
        },
        None => GENERIC_CATEGORY,
    }
}

/// Infer a category from product name and style keywords. First match wins.
pub fn infer_category(params: &ExtractedParameters) -> Option<Category> {
    let product = params
        .product_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let keywords: Vec<String> = params
        .style_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    let has_marker = |markers: &[&str]| {
        markers
            .iter()
            .any(|m| product.contains(m) || keywords.iter().any(|k| k.contains(m)))
    };

    if keywords.iter().any(|k| LUXURY_KEYWORDS.contains(&k.as_str())) || product.contains("luxury") {
        Some(Category::Luxury)
    } else if has_marker(TECH_MARKERS) {
        Some(Category::Tech)
    } else if has_marker(FITNESS_MARKERS) {
        Some(Category::Fitness)
    } else {
        None
    }
}

/// Computes defaults from extracted parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartDefaults;

impl SmartDefaults {
    pub fn new() -> Self {
        Self
    }

    /// Defaults for `params`. An explicit category overrides inference.
    ///
    /// Platform pacing applies unless a category was detected, in which case
    /// the category's pacing wins. `defaulted_fields` lists every path whose
    /// value did not come from the prompt.
    pub fn compute(
        &self,
        params: &ExtractedParameters,
        explicit_category: Option<Category>,
    ) -> Defaults {
        let category = explicit_category.or_else(|| infer_category(params));
        let platform = platform_profile(params.platform);
        let creative = category_profile(category);

        let defaults = Defaults {
            technical: TechnicalDefaults {
                platform: params.platform,
                aspect_ratio: platform.aspect_ratio.to_string(),
                duration: params.duration.unwrap_or(platform.duration),
                fps: platform.fps,
            },
            pacing: PacingDefaults {
                style: match category {
                    Some(_) => creative.pacing,
                    None => platform.pacing,
                }
                .to_string(),
                cuts_per_minute: platform.cuts_per_minute,
            },
            visual: VisualDefaults {
                transition_style: creative.transition_style.to_string(),
                lighting_style: creative.lighting_style.to_string(),
            },
            audio: AudioDefaults {
                music_genre: creative.music_genre.to_string(),
            },
            category,
            defaulted_fields: Vec::new(),
        };

        let defaulted_fields = defaults
            .field_values()
            .into_iter()
            .map(|(path, _)| path)
            .filter(|path| !supplied_by_prompt(path, params))
            .map(str::to_string)
            .collect();

        Defaults {
            defaulted_fields,
            ..defaults
        }
    }
}

fn supplied_by_prompt(path: &str, params: &ExtractedParameters) -> bool {
    match path {
        "technical_specs.duration" => params.duration.is_some(),
        "technical_specs.platform" => params.platform.is_some(),
        _ => false,
    }
}

/// Write defaults into every path the document leaves unset.
///
/// Returns the paths that were filled. Running it again on the result fills
/// nothing.
pub fn fill_missing(direction: &mut CreativeDirection, defaults: &Defaults) -> Vec<String> {
    let mut filled = Vec::new();
    for (path, value) in defaults.field_values() {
        if !direction.has(path) {
            direction.set(path, value);
            filled.push(path.to_string());
        }
    }
    filled
}
