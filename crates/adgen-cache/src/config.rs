//! Cache configuration.

use std::time::Duration;

/// Cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis URL; `None` selects the in-memory store
    pub redis_url: Option<String>,
    /// Entry time-to-live
    pub ttl: Duration,
    /// Key namespace
    pub namespace: String,
    /// Key version, bumped when the response shape changes
    pub version: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl: Duration::from_secs(3600), // 1 hour
            namespace: "prompt_parse".to_string(),
            version: "v1".to_string(),
        }
    }
}

impl CacheConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            redis_url: std::env::var("REDIS_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ttl: Duration::from_secs(
                std::env::var("CACHE_TTL_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
            namespace: std::env::var("CACHE_NAMESPACE")
                .unwrap_or_else(|_| "prompt_parse".to_string()),
            version: std::env::var("CACHE_VERSION").unwrap_or_else(|_| "v1".to_string()),
        }
    }

    /// Key prefix shared by every entry this service writes.
    pub fn key_prefix(&self) -> String {
        format!("{}:{}:", self.namespace, self.version)
    }
}
