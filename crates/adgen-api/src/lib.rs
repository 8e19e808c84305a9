//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /api/v1/parse` in front of the creative-direction pipeline
//! - Administrative cache clear and provider listing
//! - Per-IP rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
