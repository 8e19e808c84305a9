//! LLM provider configuration.

use std::time::Duration;

/// Registry name of the deterministic mock provider.
pub const MOCK_PROVIDER: &str = "mock";

/// Provider credentials and call settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,

    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_base_url: String,

    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,

    /// Provider tried first when the request names none
    pub default_provider: String,
    /// Upper bound for a single provider call
    pub timeout: Duration,
    /// Register the deterministic mock provider ahead of the others
    pub use_mock: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            anthropic_api_key: None,
            anthropic_model: "claude-3-5-sonnet-latest".to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            default_provider: "openai".to_string(),
            timeout: Duration::from_secs(60),
            use_mock: false,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl LlmConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: non_empty_env("OPENAI_API_KEY"),
            openai_model: non_empty_env("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: non_empty_env("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            anthropic_api_key: non_empty_env("ANTHROPIC_API_KEY"),
            anthropic_model: non_empty_env("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            anthropic_base_url: non_empty_env("ANTHROPIC_BASE_URL")
                .unwrap_or(defaults.anthropic_base_url),
            gemini_api_key: non_empty_env("GEMINI_API_KEY"),
            gemini_model: non_empty_env("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: non_empty_env("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            default_provider: non_empty_env("DEFAULT_LLM_PROVIDER")
                .map(|s| s.to_lowercase())
                .unwrap_or(defaults.default_provider),
            timeout: Duration::from_secs(
                std::env::var("LLM_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            use_mock: std::env::var("USE_MOCK_LLM")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Returns true if at least one real provider has credentials.
    pub fn has_credentials(&self) -> bool {
        self.openai_api_key.is_some()
            || self.anthropic_api_key.is_some()
            || self.gemini_api_key.is_some()
    }

    /// Provider tried first when a request names none. The mock takes
    /// precedence over `configured` when `use_mock` is set.
    pub fn preferred_provider(&self, configured: &str) -> String {
        if self.use_mock {
            MOCK_PROVIDER.to_string()
        } else {
            configured.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_provider_follows_mock_toggle() {
        let mut config = LlmConfig::default();
        assert_eq!(config.preferred_provider("gemini"), "gemini");

        config.use_mock = true;
        assert_eq!(config.preferred_provider("gemini"), MOCK_PROVIDER);
    }
}
