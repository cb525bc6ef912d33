//! The seam between the adapters and the wrapped client.
//!
//! A driver executes one native `redis::Cmd` and returns the raw reply.
//! Everything above it (validation, translation, decoding, correlation) is
//! shared by every driver.
//!
//! # Feature Flags
//!
//! - `connection-manager` (default): [`RedisDriver`] over a live server
//! - `memory` (default): [`MemoryDriver`], an in-process interpreter

use async_trait::async_trait;

use rxredis_core::Result;

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "connection-manager")]
mod redis_impl;

#[cfg(feature = "memory")]
pub use memory::MemoryDriver;

#[cfg(feature = "connection-manager")]
pub use redis_impl::RedisDriver;

/// Executes native commands.
///
/// Implementations must be safe to call concurrently: a response stream may
/// have many commands in flight against the same driver.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Sends a command and returns its raw reply.
    ///
    /// Server error replies are returned as `CommandError::ExecutionFailed`,
    /// transport problems as `CommandError::ConnectionFailed`.
    async fn execute(&self, cmd: redis::Cmd) -> Result<redis::Value>;
}

