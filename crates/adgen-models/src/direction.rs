//! Creative-direction document.
//!
//! Providers return loosely shaped JSON, so the document is kept as an open
//! JSON object with typed accessors for the fields the pipeline reads and
//! writes. Paths are dotted (`technical_specs.duration`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::scene::Scene;

/// Which input modality drove the visual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StyleSource {
    Text,
    Image,
    Video,
}

impl StyleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleSource::Text => "text",
            StyleSource::Image => "image",
            StyleSource::Video => "video",
        }
    }
}

impl fmt::Display for StyleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured ad description returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CreativeDirection(Map<String, Value>);

impl CreativeDirection {
    /// Top-level sections every complete document carries.
    pub const SECTIONS: &'static [&'static str] = &[
        "product",
        "technical_specs",
        "visual_direction",
        "audio_direction",
        "text_strategy",
        "pacing",
        "cta",
    ];

    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value; returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Look up a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.0.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Returns true if the path holds a non-null value.
    pub fn has(&self, path: &str) -> bool {
        matches!(self.get(path), Some(v) if !v.is_null())
    }

    /// Set a dotted path, creating intermediate objects.
    ///
    /// A non-object value sitting on an intermediate segment is replaced.
    pub fn set(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.0;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value);
    }

    /// `product.name`, if a non-blank string.
    pub fn product_name(&self) -> Option<&str> {
        self.get("product.name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `technical_specs.duration` in seconds, accepting numeric strings.
    pub fn duration(&self) -> Option<f64> {
        let value = self.get("technical_specs.duration")?;
        let seconds = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches('s').trim().parse().ok(),
            _ => None,
        }?;
        (seconds.is_finite() && seconds > 0.0).then_some(seconds)
    }

    /// Raw `scenes` value as returned by the provider.
    pub fn scenes(&self) -> Option<&Value> {
        self.0.get("scenes")
    }

    pub fn set_scenes(&mut self, scenes: &[Scene]) {
        let values = scenes
            .iter()
            .filter_map(|s| serde_json::to_value(s).ok())
            .collect();
        self.0.insert("scenes".to_string(), Value::Array(values));
    }

    pub fn style_source(&self) -> Option<StyleSource> {
        self.get("visual_direction.style_source")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn set_style_source(&mut self, source: StyleSource) {
        self.set(
            "visual_direction.style_source",
            Value::String(source.as_str().to_string()),
        );
    }

    /// Whether the ad carries an audio track.
    ///
    /// An explicit `audio_direction.enabled: false` switches audio off;
    /// otherwise any non-empty audio section counts.
    pub fn includes_audio(&self) -> bool {
        if let Some(Value::Bool(enabled)) = self.get("audio_direction.enabled") {
            return *enabled;
        }
        matches!(self.get("audio_direction"), Some(Value::Object(map)) if !map.is_empty())
    }
}

impl From<Map<String, Value>> for CreativeDirection {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
