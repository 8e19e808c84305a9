//! LLM error types.

use thiserror::Error;

pub type LlmResult<T> = Result<T, LlmError>;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider returned no content")]
    EmptyCompletion,

    #[error("Provider timed out after {0} seconds")]
    Timeout(u64),

    #[error("Completion rejected: {0}")]
    InvalidCompletion(String),

    #[error("All {attempts} provider(s) failed; last error: {last_error}")]
    ProvidersExhausted { attempts: usize, last_error: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_completion(msg: impl Into<String>) -> Self {
        Self::InvalidCompletion(msg.into())
    }

    pub fn missing_credentials(msg: impl Into<String>) -> Self {
        Self::MissingCredentials(msg.into())
    }

    /// Returns true if every provider failed.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, LlmError::ProvidersExhausted { .. })
    }
}
