//! Creative-direction parse endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::warn;

use adgen_models::{ParseRequest, ParseResponse};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Turn a prompt (text and/or visual references) into a creative direction.
pub async fn parse_prompt(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> ApiResult<Json<ParseResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Malformed parse request");
        ApiError::from(rejection)
    })?;

    let response = state.parser.parse(&request).await?;
    Ok(Json(response))
}
