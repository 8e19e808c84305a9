//! Failure-absorbing cache facade used by the pipeline.
//!
//! Store errors never propagate from `get_json`/`set_json`/`delete`: they
//! are logged and reported as a miss or a no-op. Entries that no longer
//! deserialize are treated as misses too.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CacheResult;
use crate::metrics;
use crate::store::CacheStore;

/// Shared cache handle.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CacheManager {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up and deserialize an entry; any failure is a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "Cache MISS");
                metrics::record_lookup("miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache unavailable on get, treating as miss");
                metrics::record_lookup("error");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %key, "Cache HIT");
                metrics::record_lookup("hit");
                Some(value)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cached entry is corrupt, treating as miss");
                metrics::record_lookup("error");
                None
            }
        }
    }

    /// Serialize and store an entry with the configured TTL.
    ///
    /// Returns whether the write succeeded.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize cache entry");
                metrics::record_write("error");
                return false;
            }
        };

        match self.store.set(key, &raw, self.ttl).await {
            Ok(()) => {
                debug!(key = %key, ttl_secs = self.ttl.as_secs(), "Cache entry stored");
                metrics::record_write("ok");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache unavailable on set, skipping write");
                metrics::record_write("error");
                false
            }
        }
    }

    pub async fn delete(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            warn!(key = %key, error = %e, "Cache unavailable on delete");
        }
    }

    /// Administrative bulk clear; errors are returned to the caller.
    pub async fn clear(&self, pattern: &str) -> CacheResult<u64> {
        self.store.clear(pattern).await
    }

    pub async fn ping(&self) -> CacheResult<()> {
        self.store.ping().await
    }
}
