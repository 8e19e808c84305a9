//! Cache store contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::config::CacheConfig;
use crate::error::CacheResult;
use crate::memory::InMemoryCache;
use crate::redis_store::RedisCache;

/// Key/value store with per-entry TTL.
///
/// Implementations must tolerate concurrent unsynchronized access to the
/// same key; the last write wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Backend name for logging and readiness output.
    fn backend(&self) -> &'static str;

    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Remove every entry whose key starts with `pattern`.
    ///
    /// A trailing `*` is accepted and ignored. Returns the number removed.
    async fn clear(&self, pattern: &str) -> CacheResult<u64>;

    /// Connectivity check.
    async fn ping(&self) -> CacheResult<()>;
}

/// Strip an optional trailing glob star from a clear pattern.
pub(crate) fn prefix_of(pattern: &str) -> &str {
    pattern.strip_suffix('*').unwrap_or(pattern)
}

/// Build the store selected by configuration.
pub fn build_store(config: &CacheConfig) -> CacheResult<Arc<dyn CacheStore>> {
    match &config.redis_url {
        Some(url) => {
            info!("Using Redis cache backend");
            Ok(Arc::new(RedisCache::new(url)?))
        }
        None => {
            info!("REDIS_URL not set, using in-memory cache backend");
            Ok(Arc::new(InMemoryCache::new()))
        }
    }
}
