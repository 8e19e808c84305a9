//! Rule-based parameter extraction from free-text prompts.

use std::sync::LazyLock;

use adgen_models::{ExtractedParameters, Platform};
use regex::{Captures, Regex};

/// Longest product name kept, in characters.
const MAX_PRODUCT_NAME_LENGTH: usize = 80;

/// Aesthetic vocabulary recognised as style keywords.
pub const STYLE_VOCABULARY: &[&str] = &[
    "luxury",
    "luxurious",
    "premium",
    "elegant",
    "high-end",
    "exclusive",
    "minimalist",
    "minimal",
    "modern",
    "sleek",
    "clean",
    "vintage",
    "retro",
    "cinematic",
    "dramatic",
    "moody",
    "dark",
    "bright",
    "vibrant",
    "colorful",
    "pastel",
    "neon",
    "monochrome",
    "bold",
    "playful",
    "energetic",
    "calm",
    "warm",
    "futuristic",
    "natural",
    "organic",
    "urban",
    "gritty",
    "documentary",
];

static SECONDS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)(\s*-?\s*)(s|sec|secs|second|seconds)\b").unwrap()
});

static MINUTES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*-?\s*(?:min|mins|minute|minutes)\b").unwrap()
});

/// Words that mark "80s" as an era rather than a length.
const ERA_WORDS: &[&str] = &[
    "the", "early", "mid", "late", "retro", "vintage", "throwback", "style", "styled", "vibe",
    "vibes", "look", "aesthetic", "era", "inspired", "music", "fashion", "feel", "theme", "mood",
];

static PLATFORM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(youtube\s+shorts|yt\s+shorts|instagram|ig|reels|tiktok|tik tok|youtube|yt)\b",
    )
    .unwrap()
});

// Product phrase ends at punctuation, end of text, or a connective.
const PRODUCT_TAIL: &str =
    r"(?:\s+(?:with|in|that|which|featuring|showing|on|targeting|to)\b|[,.!?;:\n]|$)";

static PRODUCT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:ad|ads|advert|advertisement|commercial|video|promo|spot)\s+for\s+(?:an?\s+|the\s+|our\s+|my\s+)?(.+?)",
        r"(?i)\b(?:promoting|showcasing|featuring|advertising|launching)\s+(?:an?\s+|the\s+|our\s+|my\s+)?(.+?)",
        r"(?i)\bfor\s+(?:an?\s+|the\s+|our\s+|my\s+)?(.+?)",
    ]
    .iter()
    .map(|head| Regex::new(&format!("{}{}", head, PRODUCT_TAIL)).unwrap())
    .collect()
});

static STYLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = STYLE_VOCABULARY
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({})\b", alternation)).unwrap()
});

/// Extracts duration, platform, product and style keywords from prompt text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterExtractor;

impl ParameterExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> ExtractedParameters {
        ExtractedParameters {
            duration: extract_duration(text),
            platform: extract_platform(text),
            product_name: extract_product_name(text),
            style_keywords: extract_style_keywords(text),
        }
    }
}

/// First duration mention in seconds. Seconds win over minutes.
pub fn extract_duration(text: &str) -> Option<f64> {
    let seconds = SECONDS_PATTERN
        .captures_iter(text)
        .filter(|c| !is_decade(text, c))
        .find_map(|c| positive(&c[1], 1.0));
    seconds.or_else(|| {
        MINUTES_PATTERN
            .captures(text)
            .and_then(|c| positive(&c[1], 60.0))
    })
}

fn positive(number: &str, scale: f64) -> Option<f64> {
    number
        .parse::<f64>()
        .ok()
        .map(|v| v * scale)
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// "1990s", or "80s" next to an era word. A bare "30s" stays a duration.
fn is_decade(text: &str, caps: &Captures<'_>) -> bool {
    let (number, separator, unit) = (&caps[1], &caps[2], &caps[3]);
    if !unit.eq_ignore_ascii_case("s") || !separator.is_empty() || !number.ends_with('0') {
        return false;
    }
    match number.len() {
        4 => true,
        2 => {
            let Some(whole) = caps.get(0) else {
                return false;
            };
            let before = text[..whole.start()].split_whitespace().next_back();
            let after = text[whole.end()..]
                .split(|c: char| c.is_whitespace() || c == '-')
                .find(|w| !w.is_empty());
            [before, after]
                .into_iter()
                .flatten()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
                .any(|w| ERA_WORDS.contains(&w.as_str()))
        }
        _ => false,
    }
}

pub fn extract_platform(text: &str) -> Option<Platform> {
    PLATFORM_PATTERN.find(text).and_then(|m| {
        let normalized = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        normalized.parse().ok()
    })
}

pub fn extract_product_name(text: &str) -> Option<String> {
    PRODUCT_PATTERNS.iter().find_map(|re| {
        let captured = re.captures(text)?.get(1)?.as_str().trim();
        let name: String = captured.chars().take(MAX_PRODUCT_NAME_LENGTH).collect();
        let name = name.trim().to_string();
        (!name.is_empty()).then_some(name)
    })
}

/// Vocabulary keywords in first-seen order, lowercased and deduplicated.
pub fn extract_style_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for m in STYLE_PATTERN.find_iter(text) {
        let keyword = m.as_str().to_lowercase();
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    keywords
}
