//! Parse request models.
//!
//! A request carries the multi-modal prompt, per-request options and an
//! optional edit context holding the previous creative direction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum prompt text length accepted when no explicit limit is configured.
pub const DEFAULT_MAX_PROMPT_LENGTH: usize = 5000;

/// Reasons a prompt is rejected before any external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptValidationError {
    #[error("prompt must contain text, an image reference or a video reference")]
    Empty,

    #[error("prompt text is {len} characters, maximum is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("llm_provider must not be blank")]
    BlankProviderName,
}

/// Multi-modal user prompt.
///
/// Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Inline base64 image (optionally a `data:` URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Inline base64 video (optionally a `data:` URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_base64: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PromptInput {
    /// Create a text-only prompt.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Trimmed prompt text, if any.
    pub fn text(&self) -> Option<&str> {
        present(&self.text)
    }

    pub fn image_url(&self) -> Option<&str> {
        present(&self.image_url)
    }

    pub fn image_base64(&self) -> Option<&str> {
        present(&self.image_base64)
    }

    pub fn video_url(&self) -> Option<&str> {
        present(&self.video_url)
    }

    pub fn video_base64(&self) -> Option<&str> {
        present(&self.video_base64)
    }

    pub fn has_image(&self) -> bool {
        self.image_url().is_some() || self.image_base64().is_some()
    }

    pub fn has_video(&self) -> bool {
        self.video_url().is_some() || self.video_base64().is_some()
    }

    /// Returns true if no modality is present.
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && !self.has_image() && !self.has_video()
    }

    /// Validate the prompt against the configured text limit.
    pub fn validate(&self, max_text_length: usize) -> Result<(), PromptValidationError> {
        if self.is_empty() {
            return Err(PromptValidationError::Empty);
        }

        if let Some(text) = self.text() {
            let len = text.chars().count();
            if len > max_text_length {
                return Err(PromptValidationError::TextTooLong {
                    len,
                    max: max_text_length,
                });
            }
        }

        Ok(())
    }
}

/// Per-request options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParseOptions {
    /// Preferred provider name; other providers are still tried on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,

    #[serde(default)]
    pub include_cost_estimate: bool,

    #[serde(default = "default_cost_fallback")]
    pub cost_fallback_enabled: bool,
}

fn default_cost_fallback() -> bool {
    true
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            llm_provider: None,
            include_cost_estimate: false,
            cost_fallback_enabled: true,
        }
    }
}

impl ParseOptions {
    pub fn validate(&self) -> Result<(), PromptValidationError> {
        match &self.llm_provider {
            Some(name) if name.trim().is_empty() => Err(PromptValidationError::BlankProviderName),
            _ => Ok(()),
        }
    }
}

/// Context for iterative edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParseContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_config: Option<serde_json::Value>,
}

/// Full parse request as received over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParseRequest {
    pub prompt: PromptInput,

    #[serde(default)]
    pub options: ParseOptions,

    /// Caller-supplied cost estimate, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ParseContext>,

    /// Explicit product category; overrides keyword inference when recognised
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_category: Option<String>,
}

impl ParseRequest {
    /// Create a request with default options.
    pub fn new(prompt: PromptInput) -> Self {
        Self {
            prompt,
            options: ParseOptions::default(),
            cost_estimate: None,
            context: None,
            target_category: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.options.llm_provider = Some(provider.into());
        self
    }

    pub fn with_previous_config(mut self, previous: serde_json::Value) -> Self {
        self.context = Some(ParseContext {
            previous_config: Some(previous),
        });
        self
    }

    /// Previous creative direction, if this is an edit.
    pub fn previous_config(&self) -> Option<&serde_json::Value> {
        self.context.as_ref().and_then(|c| c.previous_config.as_ref())
    }

    /// Validate prompt and options.
    pub fn validate(&self, max_text_length: usize) -> Result<(), PromptValidationError> {
        self.prompt.validate(max_text_length)?;
        self.options.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(
            PromptInput::default().validate(DEFAULT_MAX_PROMPT_LENGTH),
            Err(PromptValidationError::Empty)
        );

        let blank = PromptInput {
            text: Some("   ".to_string()),
            image_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            blank.validate(DEFAULT_MAX_PROMPT_LENGTH),
            Err(PromptValidationError::Empty)
        );
    }

    #[test]
    fn test_image_only_prompt_is_valid() {
        let prompt = PromptInput {
            image_base64: Some("iVBORw0KGgo=".to_string()),
            ..Default::default()
        };
        assert!(prompt.validate(DEFAULT_MAX_PROMPT_LENGTH).is_ok());
        assert!(prompt.has_image());
        assert!(!prompt.has_video());
    }

    #[test]
    fn test_text_length_limit() {
        let prompt = PromptInput::from_text("a".repeat(11));
        assert_eq!(
            prompt.validate(10),
            Err(PromptValidationError::TextTooLong { len: 11, max: 10 })
        );
        assert!(prompt.validate(11).is_ok());
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let request: ParseRequest =
            serde_json::from_str(r#"{"prompt": {"text": "30 second ad"}}"#).unwrap();
        assert_eq!(request.prompt.text(), Some("30 second ad"));
        assert!(!request.options.include_cost_estimate);
        assert!(request.options.cost_fallback_enabled);
        assert!(request.previous_config().is_none());
    }

    #[test]
    fn test_blank_provider_rejected() {
        let request = ParseRequest::new(PromptInput::from_text("ad")).with_provider("  ");
        assert_eq!(
            request.validate(DEFAULT_MAX_PROMPT_LENGTH),
            Err(PromptValidationError::BlankProviderName)
        );
    }
}
