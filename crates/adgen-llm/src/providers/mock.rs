//! Deterministic in-process provider.
//!
//! Used when `USE_MOCK_LLM` is set or no credentials are configured, and as
//! a scriptable stub in tests: it can return a fixed completion, fail with
//! a fixed error, and counts how often it was called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::error::{LlmError, LlmResult};
use crate::provider::{LlmProvider, ResponseFormat};

#[derive(Debug, Clone)]
enum Behavior {
    Canned,
    Respond(String),
    Fail(String),
}

/// Mock LLM provider.
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: String,
    behavior: Behavior,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Provider returning a canned creative direction without scenes.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            behavior: Behavior::Canned,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider returning `completion` verbatim.
    pub fn responding(completion: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Respond(completion.into()),
            ..Self::new()
        }
    }

    /// Provider failing every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            ..Self::new()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sleep before answering, to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `complete` calls so far (shared across clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Canned document whose product description echoes the first
    /// non-empty prompt line, so distinct prompts yield distinct output.
    fn canned_completion(prompt: &str) -> String {
        let brief: String = prompt
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .chars()
            .take(120)
            .collect();

        json!({
            "product": {
                "name": "Featured Product",
                "description": brief,
                "category": "general",
                "key_benefits": ["quality", "design"]
            },
            "visual_direction": {
                "style": "clean modern",
                "color_palette": ["#111111", "#f5f5f5"]
            },
            "audio_direction": {
                "voiceover": false
            },
            "text_strategy": {
                "tone": "confident",
                "headline": "Made for everyday"
            },
            "cta": {
                "text": "Shop now",
                "placement": "end_card"
            }
        })
        .to_string()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        prompt: &str,
        _system_prompt: &str,
        _response_format: ResponseFormat,
    ) -> LlmResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Canned => Ok(Self::canned_completion(prompt)),
            Behavior::Respond(text) => Ok(text.clone()),
            Behavior::Fail(message) => Err(LlmError::request_failed(message.clone())),
        }
    }

    fn is_available(&self) -> bool {
        true
    }

    fn get_estimated_latency(&self) -> Duration {
        self.delay.unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_completion_is_json_object() {
        let provider = MockProvider::new();
        let text = provider
            .complete("\n30 second ad for sneakers\nmore", "s", ResponseFormat::Json)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.is_object());
        assert_eq!(value["product"]["description"], "30 second ad for sneakers");
        assert!(value.get("scenes").is_none());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_call_counter() {
        let provider = MockProvider::failing("boom");
        let clone = provider.clone();
        assert!(clone.complete("p", "s", ResponseFormat::Text).await.is_err());
        assert_eq!(provider.call_count(), 1);
    }
}
