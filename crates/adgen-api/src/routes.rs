//! API routes.

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

use crate::handlers::{clear_cache, health, list_providers, parse_prompt, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let mut api_routes = Router::new()
        .route("/v1/parse", post(parse_prompt))
        .route("/v1/cache", delete(clear_cache))
        .route("/v1/providers", get(list_providers));

    match NonZeroU32::new(state.config.rate_limit_per_minute) {
        Some(per_minute) => {
            let rate_limiter = Arc::new(RateLimiterCache::per_minute(per_minute));
            api_routes = api_routes.layer(middleware::from_fn_with_state(
                rate_limiter,
                rate_limit_middleware,
            ));
        }
        None => warn!("RATE_LIMIT_PER_MINUTE is 0, rate limiting disabled"),
    }

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    let metrics_routes = match metrics_handle {
        Some(handle) => Router::new().route("/metrics", get(move || async move { handle.render() })),
        None => Router::new(),
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // Inline base64 references exceed axum's 2MB default; the tower limit governs.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
