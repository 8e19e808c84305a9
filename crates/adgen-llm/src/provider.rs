//! Provider capability contract.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::LlmResult;

/// Requested completion format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    /// Ask the provider for a single JSON object
    Json,
}

/// An interchangeable text-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name as registered.
    fn name(&self) -> &str;

    /// Produce a completion for the prompt under the system prompt.
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        response_format: ResponseFormat,
    ) -> LlmResult<String>;

    /// Whether the provider is configured to accept calls.
    fn is_available(&self) -> bool;

    /// Typical round-trip time, for diagnostics.
    fn get_estimated_latency(&self) -> Duration;
}

/// Strip a surrounding markdown code fence (```json ... ```) if present.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest.trim_start_matches("json"),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  ```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    }
}
