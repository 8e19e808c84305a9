//! Pipeline error types.
//!
//! Only these kinds terminate a parse request. Cache, scene-schema and
//! reference-analysis failures are absorbed inside the pipeline.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Content rejected: {reason}")]
    ContentRejected { reason: String },

    #[error("All {attempts} LLM provider(s) failed: {last_error}")]
    ProvidersExhausted { attempts: usize, last_error: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn content_rejected(reason: impl Into<String>) -> Self {
        Self::ContentRejected {
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the request itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidInput(_) | PipelineError::ContentRejected { .. }
        )
    }
}

impl From<adgen_models::PromptValidationError> for PipelineError {
    fn from(e: adgen_models::PromptValidationError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<adgen_llm::LlmError> for PipelineError {
    fn from(e: adgen_llm::LlmError) -> Self {
        match e {
            adgen_llm::LlmError::ProvidersExhausted {
                attempts,
                last_error,
            } => Self::ProvidersExhausted {
                attempts,
                last_error,
            },
            other => Self::ProvidersExhausted {
                attempts: 0,
                last_error: other.to_string(),
            },
        }
    }
}
