// crates/server/src/cache/mod.rs
//! Key-value backends for cached channel records.
//!
//! Backends store opaque bytes with an expiry; encoding the record is the
//! caller's job (see [`crate::dashboard`]).

mod memory;
mod redis;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// How long a computed channel record is served from cache.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// A byte store with per-key expiry.
#[async_trait]
pub trait StatsCache: Send + Sync {
    /// Fetch the bytes stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value, for `ttl`.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}
