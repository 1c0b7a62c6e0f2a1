// crates/server/src/dashboard.rs
//! Cache-aside access to assembled channel records.
//!
//! A request first looks in the cache under the exact channel token. On a
//! miss the record is assembled from the database, stored for [`CACHE_TTL`],
//! and returned. Concurrent misses for the same token may each rebuild; the
//! last write wins.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kstats_core::ChannelStats;
use kstats_db::{Database, DbError};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{CacheError, StatsCache, CACHE_TTL};
use crate::metrics::{record_build, record_cache_lookup};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Cache write failed: {0}")]
    Cache(#[from] CacheError),

    #[error("Failed to encode channel record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct Dashboard {
    db: Database,
    cache: Arc<dyn StatsCache>,
    ttl: Duration,
}

impl Dashboard {
    pub fn new(db: Database, cache: Arc<dyn StatsCache>) -> Self {
        Self {
            db,
            cache,
            ttl: CACHE_TTL,
        }
    }

    #[cfg(test)]
    fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.name()
    }

    /// Look up a cached record. Backend errors and undecodable entries are
    /// treated as a miss.
    pub async fn cached(&self, token: &str) -> Option<ChannelStats> {
        let bytes = match self.cache.get(token).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(channel = %token, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!(channel = %token, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Return the record for `token`, building and caching it on a miss.
    ///
    /// Nothing is cached when the channel is unknown or assembly fails. A
    /// failed cache write is reported as an error even though the record was
    /// built.
    pub async fn channel_stats(&self, token: &str) -> Result<ChannelStats, DashboardError> {
        if let Some(stats) = self.cached(token).await {
            record_cache_lookup(true);
            debug!(channel = %token, "Cache hit");
            return Ok(stats);
        }
        record_cache_lookup(false);

        let start = Instant::now();
        let stats = self.db.build_channel_stats(token).await?;
        record_build(start.elapsed());

        let encoded = serde_json::to_vec(&stats)?;
        self.cache.set(token, &encoded, self.ttl).await?;
        debug!(channel = %token, bytes = encoded.len(), "Cached channel record");

        Ok(stats)
    }
}
