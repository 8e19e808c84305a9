//! Administrative handlers for the response cache and provider registry.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClearCacheQuery {
    /// Key prefix; a trailing `*` is accepted
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub pattern: String,
    pub cleared: u64,
}

/// Remove cached creative directions whose key starts with `pattern`.
///
/// Without a pattern every entry this service wrote is removed.
pub async fn clear_cache(
    State(state): State<AppState>,
    Query(query): Query<ClearCacheQuery>,
) -> ApiResult<Json<ClearCacheResponse>> {
    let pattern = query
        .pattern
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| state.cache_prefix());

    // A bare wildcard would reach keys owned by other services.
    if pattern == "*" {
        return Err(ApiError::bad_request(
            "pattern must name a key prefix, not a bare wildcard",
        ));
    }

    let cleared = state.cache.clear(&pattern).await?;
    info!(pattern = %pattern, cleared, "Cache cleared");

    Ok(Json(ClearCacheResponse { pattern, cleared }))
}

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub available: bool,
    pub estimated_latency_ms: u64,
    pub default: bool,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderInfo>,
}

/// List registered providers in fallback order.
pub async fn list_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    let default_provider = state.parser.orchestrator().default_provider();
    let providers = state
        .providers
        .iter()
        .map(|(name, provider)| ProviderInfo {
            name: name.to_string(),
            available: provider.is_available(),
            estimated_latency_ms: provider.get_estimated_latency().as_millis() as u64,
            default: name.eq_ignore_ascii_case(default_provider),
        })
        .collect();

    Json(ProvidersResponse { providers })
}
