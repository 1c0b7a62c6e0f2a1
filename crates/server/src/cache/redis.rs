// crates/server/src/cache/redis.rs
//! Redis-backed cache.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use super::{CacheError, StatsCache};

/// Shared Redis connection. The manager reconnects on its own; clones share
/// one multiplexed connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to `address` (`host:port`), authenticating when a non-empty
    /// password is given.
    pub async fn connect(address: &str, password: Option<&str>) -> Result<Self, CacheError> {
        let client = redis::Client::open(connection_url(address, password))?;
        let conn = ConnectionManager::new(client).await?;
        info!(address = %address, "Connected to Redis");
        Ok(Self { conn })
    }
}

fn connection_url(address: &str, password: Option<&str>) -> String {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!("redis://:{}@{}/", urlencoding::encode(password), address),
        None => format!("redis://{}/", address),
    }
}

#[async_trait]
impl StatsCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
