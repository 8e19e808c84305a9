//! Ordered provider fallback.
//!
//! One attempt per candidate, in registry order with the requested provider
//! first. A call that errors, times out, or returns a completion the caller
//! rejects counts as that provider's failure and moves on to the next one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{LlmError, LlmResult};
use crate::metrics;
use crate::provider::ResponseFormat;
use crate::registry::ProviderRegistry;

/// How a single provider attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Failed(String),
    TimedOut,
    Rejected(String),
}

impl AttemptOutcome {
    pub fn as_label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success => "success",
            AttemptOutcome::Failed(_) => "error",
            AttemptOutcome::TimedOut => "timeout",
            AttemptOutcome::Rejected(_) => "rejected",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success)
    }
}

/// Diagnostic record for one provider attempt.
#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    pub provider: String,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

/// Successful orchestration result.
#[derive(Debug)]
pub struct Completion<T> {
    /// Name of the provider that produced `value`
    pub provider: String,
    pub value: T,
    /// Every attempt made, including the successful one
    pub attempts: Vec<ProviderAttempt>,
}

/// Runs a completion against the registry's providers until one succeeds.
#[derive(Clone)]
pub struct ProviderOrchestrator {
    registry: Arc<ProviderRegistry>,
    default_provider: String,
    timeout: Duration,
}

impl ProviderOrchestrator {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        default_provider: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            default_provider: default_provider.into(),
            timeout,
        }
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Try candidates in order. `accept` converts the raw completion into
    /// the caller's value; an `Err` from it is treated as provider failure.
    pub async fn complete<T, F>(
        &self,
        requested: Option<&str>,
        prompt: &str,
        system_prompt: &str,
        response_format: ResponseFormat,
        accept: F,
    ) -> LlmResult<Completion<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        let candidates = self.registry.candidates(requested, &self.default_provider);
        let mut attempts = Vec::with_capacity(candidates.len());
        let mut last_error: Option<String> = None;

        for (name, provider) in candidates {
            info!(provider = %name, "Attempting LLM provider");
            let start = Instant::now();

            let result = tokio::time::timeout(
                self.timeout,
                provider.complete(prompt, system_prompt, response_format),
            )
            .await;

            let elapsed = start.elapsed();
            let (outcome, message) = match result {
                Ok(Ok(text)) => match accept(&text) {
                    Ok(value) => {
                        metrics::record_attempt(&name, "success", elapsed.as_secs_f64());
                        info!(
                            provider = %name,
                            elapsed_ms = elapsed.as_millis() as u64,
                            "LLM provider succeeded"
                        );
                        attempts.push(ProviderAttempt {
                            provider: name.clone(),
                            outcome: AttemptOutcome::Success,
                            elapsed,
                        });
                        return Ok(Completion {
                            provider: name,
                            value,
                            attempts,
                        });
                    }
                    Err(reason) => {
                        let message = LlmError::invalid_completion(reason.clone()).to_string();
                        (AttemptOutcome::Rejected(reason), message)
                    }
                },
                Ok(Err(e)) => {
                    let message = e.to_string();
                    (AttemptOutcome::Failed(message.clone()), message)
                }
                Err(_) => (
                    AttemptOutcome::TimedOut,
                    LlmError::Timeout(self.timeout.as_secs()).to_string(),
                ),
            };

            warn!(provider = %name, error = %message, "LLM provider failed");
            metrics::record_attempt(&name, outcome.as_label(), elapsed.as_secs_f64());

            attempts.push(ProviderAttempt {
                provider: name,
                outcome,
                elapsed,
            });
            last_error = Some(message);
        }

        metrics::record_exhausted();
        Err(LlmError::ProvidersExhausted {
            attempts: attempts.len(),
            last_error: last_error.unwrap_or_else(|| "no providers registered".to_string()),
        })
    }
}
