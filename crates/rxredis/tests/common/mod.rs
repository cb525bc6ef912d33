//! Shared helpers for the integration tests.
#![allow(dead_code)]

use bytes::Bytes;
use rxredis::{Config, MemoryDriver, ReactiveRedisConnection, RedisDriver};
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once. Set `RUST_LOG=rxredis=trace` to see
/// every dispatched command.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A key no other test uses.
pub fn test_key(prefix: &str) -> Bytes {
    Bytes::from(format!("rxredis-test:{}:{}", prefix, uuid::Uuid::new_v4()))
}

pub fn b(value: &str) -> Bytes {
    Bytes::copy_from_slice(value.as_bytes())
}

pub fn in_memory() -> ReactiveRedisConnection<MemoryDriver> {
    init_tracing();
    ReactiveRedisConnection::in_memory()
}

/// A connection to the server named by `REDIS_URL`, or `None` when the
/// variable is unset or the server is unreachable.
pub async fn redis() -> Option<ReactiveRedisConnection<RedisDriver>> {
    init_tracing();
    std::env::var("REDIS_URL").ok()?;
    match ReactiveRedisConnection::connect(&Config::from_env()).await {
        Ok(connection) => Some(connection),
        Err(error) => {
            eprintln!("Skipping test: Redis not available ({})", error);
            None
        }
    }
}
