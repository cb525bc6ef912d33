use std::sync::Arc;

use crate::commands::{RedisGeoCommands, RedisHyperLogLogCommands, RedisZSetCommands};
use crate::config::{Config, DEFAULT_MAX_IN_FLIGHT};
use crate::driver::Driver;
use crate::execute::Executor;

#[cfg(feature = "memory")]
use crate::driver::MemoryDriver;

#[cfg(feature = "connection-manager")]
use crate::driver::RedisDriver;

/// Entry point handing out one adapter per command family.
///
/// Adapters are cheap handles sharing the connection's driver, so they can be
/// created on demand.
pub struct ReactiveRedisConnection<D> {
    executor: Executor<D>,
}

impl<D> Clone for ReactiveRedisConnection<D> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

impl<D: Driver> ReactiveRedisConnection<D> {
    /// Wraps a driver, bounding each response stream to `max_in_flight`
    /// concurrent commands.
    pub fn new(driver: D, max_in_flight: usize) -> Self {
        Self::from_shared(Arc::new(driver), max_in_flight)
    }

    pub fn from_shared(driver: Arc<D>, max_in_flight: usize) -> Self {
        Self {
            executor: Executor::new(driver, max_in_flight),
        }
    }

    pub fn driver(&self) -> &D {
        self.executor.driver()
    }

    pub fn max_in_flight(&self) -> usize {
        self.executor.max_in_flight()
    }

    pub fn hyperloglog_commands(&self) -> RedisHyperLogLogCommands<D> {
        RedisHyperLogLogCommands::new(self.executor.clone())
    }

    pub fn zset_commands(&self) -> RedisZSetCommands<D> {
        RedisZSetCommands::new(self.executor.clone())
    }

    pub fn geo_commands(&self) -> RedisGeoCommands<D> {
        RedisGeoCommands::new(self.executor.clone())
    }
}

#[cfg(feature = "connection-manager")]
impl ReactiveRedisConnection<RedisDriver> {
    /// Connects to the server at `config.redis_url`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::ConnectionFailed` if the connection cannot be established.
    pub async fn connect(config: &Config) -> rxredis_core::Result<Self> {
        let driver = RedisDriver::new(&config.redis_url).await?;
        Ok(Self::new(driver, config.max_in_flight))
    }
}

#[cfg(feature = "memory")]
impl ReactiveRedisConnection<MemoryDriver> {
    /// A connection to a fresh in-memory keyspace.
    pub fn in_memory() -> Self {
        Self::new(MemoryDriver::new(), DEFAULT_MAX_IN_FLIGHT)
    }

    pub fn in_memory_with(config: &Config) -> Self {
        Self::new(MemoryDriver::new(), config.max_in_flight)
    }
}
