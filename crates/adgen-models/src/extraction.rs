//! Parameters extracted from the free-text prompt.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target social platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
}

impl Platform {
    pub const ALL: &'static [Platform] = &[Platform::Instagram, Platform::Tiktok, Platform::Youtube];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" | "ig" | "reels" => Ok(Platform::Instagram),
            "tiktok" | "tik tok" => Ok(Platform::Tiktok),
            "youtube" | "yt" | "youtube shorts" | "yt shorts" => Ok(Platform::Youtube),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown platform: {0}")]
pub struct PlatformParseError(String);

/// Product category used to pick creative defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Luxury,
    Tech,
    Fitness,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Luxury => "luxury",
            Category::Tech => "tech",
            Category::Fitness => "fitness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "luxury" => Ok(Category::Luxury),
            "tech" | "technology" => Ok(Category::Tech),
            "fitness" => Ok(Category::Fitness),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown category: {0}")]
pub struct CategoryParseError(String);

/// Result of rule-based extraction over the prompt text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedParameters {
    /// Duration in seconds
    pub duration: Option<f64>,
    pub platform: Option<Platform>,
    pub product_name: Option<String>,
    /// Aesthetic keywords in first-seen order, without duplicates
    #[serde(default)]
    pub style_keywords: Vec<String>,
}

impl ExtractedParameters {
    pub fn has_product(&self) -> bool {
        self.product_name.is_some()
    }

    pub fn has_style_keywords(&self) -> bool {
        !self.style_keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_aliases() {
        assert_eq!("IG".parse::<Platform>().unwrap(), Platform::Instagram);
        assert_eq!("TikTok".parse::<Platform>().unwrap(), Platform::Tiktok);
        assert_eq!("YouTube Shorts".parse::<Platform>().unwrap(), Platform::Youtube);
        assert!("shorts".parse::<Platform>().is_err());
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(serde_json::to_string(&Category::Luxury).unwrap(), "\"luxury\"");
        assert_eq!("technology".parse::<Category>().unwrap(), Category::Tech);
    }
}
