//! Anthropic messages provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LlmError, LlmResult};
use crate::provider::{LlmProvider, ResponseFormat};

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Anthropic API client.
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: String,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> LlmResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        response_format: ResponseFormat,
    ) -> LlmResult<String> {
        let url = format!("{}/v1/messages", self.base_url);

        // No native JSON mode: state the constraint in the system prompt.
        let system = match response_format {
            ResponseFormat::Json => format!(
                "{}\n\nRespond with a single JSON object only, no prose.",
                system_prompt
            ),
            ResponseFormat::Text => system_prompt.to_string(),
        };

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, "Sending Anthropic messages request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::request_failed(format!("Anthropic request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let messages: MessagesResponse = response.json().await?;

        messages
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn get_estimated_latency(&self) -> Duration {
        Duration::from_millis(3000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_returns_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "ak-test"))
            .and(header("anthropic-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "{\"cta\": {}}"}]
            })))
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new(
            "ak-test",
            "claude-3-5-sonnet-latest",
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap();
        let text = provider
            .complete("prompt", "system", ResponseFormat::Json)
            .await
            .unwrap();
        assert_eq!(text, "{\"cta\": {}}");
    }

    #[tokio::test]
    async fn test_empty_content_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let provider =
            AnthropicProvider::new("ak-test", "m", server.uri(), Duration::from_secs(5)).unwrap();
        let err = provider
            .complete("prompt", "system", ResponseFormat::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyCompletion));
    }
}
