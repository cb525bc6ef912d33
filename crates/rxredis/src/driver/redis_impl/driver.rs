use async_trait::async_trait;
use tracing::info;

use rxredis_core::Result;

use super::error::map_redis_error;
use crate::driver::Driver;

/// Redis driver using the client's connection manager.
///
/// Cloning the manager is cheap and every clone shares one multiplexed
/// connection, so concurrent commands from a response stream are pipelined
/// over it.
#[derive(Clone)]
pub struct RedisDriver {
    conn: redis::aio::ConnectionManager,
}

impl RedisDriver {
    /// Creates a new Redis driver.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CommandError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        info!(url = %url, "Connected to Redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl Driver for RedisDriver {
    async fn execute(&self, cmd: redis::Cmd) -> Result<redis::Value> {
        let mut conn = self.conn.clone();
        let value: redis::Value = cmd.query_async(&mut conn).await.map_err(map_redis_error)?;
        Ok(value)
    }
}
