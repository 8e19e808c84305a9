//! Response cache for the creative-direction pipeline.
//!
//! This crate provides:
//! - Deterministic cache keys over the output-relevant request fields
//! - The `CacheStore` contract with Redis and in-memory backends
//! - `CacheManager`, which absorbs store failures so callers see a miss

pub mod config;
pub mod error;
pub mod key;
pub mod manager;
pub mod memory;
pub mod metrics;
pub mod redis_store;
pub mod store;

pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use key::{CacheKeyGenerator, CANONICAL_PROVIDER};
pub use manager::CacheManager;
pub use memory::InMemoryCache;
pub use redis_store::RedisCache;
pub use store::{build_store, CacheStore};
