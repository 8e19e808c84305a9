//! API error types.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use adgen_cache::CacheError;
use adgen_pipeline::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Content rejected: {0}")]
    ContentRejected(String),

    #[error("All LLM providers failed after {attempts} attempt(s): {last_error}")]
    ProvidersExhausted { attempts: usize, last_error: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ContentRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::ProvidersExhausted { .. } => StatusCode::BAD_GATEWAY,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) | ApiError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "invalid_input",
            ApiError::ContentRejected(_) => "content_rejected",
            ApiError::ProvidersExhausted { .. } => "providers_exhausted",
            ApiError::RateLimited => "rate_limited",
            ApiError::Internal(_) | ApiError::Cache(_) => "internal_error",
        }
    }

    /// Errors whose message may carry upstream or infrastructure details.
    fn is_internal(&self) -> bool {
        matches!(
            self,
            ApiError::Internal(_) | ApiError::Cache(_) | ApiError::ProvidersExhausted { .. }
        )
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidInput(msg) => ApiError::BadRequest(msg),
            PipelineError::ContentRejected { reason } => ApiError::ContentRejected(reason),
            PipelineError::ProvidersExhausted {
                attempts,
                last_error,
            } => ApiError::ProvidersExhausted {
                attempts,
                last_error,
            },
            PipelineError::Serialization(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Don't expose internal error details in production
        let detail = if self.is_internal()
            && std::env::var("ENVIRONMENT")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false)
        {
            match &self {
                ApiError::ProvidersExhausted { .. } => {
                    "Creative direction could not be generated".to_string()
                }
                _ => "An internal error occurred".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = ErrorResponse { detail, code };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_errors_map_to_statuses() {
        let cases = [
            (PipelineError::invalid_input("empty prompt"), StatusCode::BAD_REQUEST),
            (PipelineError::content_rejected("nope"), StatusCode::BAD_REQUEST),
            (
                PipelineError::ProvidersExhausted {
                    attempts: 2,
                    last_error: "timeout".to_string(),
                },
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(ApiError::bad_request("x").code(), "invalid_input");
        assert_eq!(ApiError::ContentRejected("x".into()).code(), "content_rejected");
        assert_eq!(ApiError::internal("x").code(), "internal_error");
    }
}
