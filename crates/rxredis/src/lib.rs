//! Reactive Redis command adapters.
//!
//! Each command family (HyperLogLog, sorted sets, geo) is exposed through a
//! trait from `rxredis_core` whose methods take a stream of command objects
//! and return a stream of responses. The adapters in this crate implement
//! those traits on top of a [`Driver`]:
//!
//! - `RedisDriver` sends commands through a `redis` connection manager
//!   (`connection-manager` feature, enabled by default);
//! - `MemoryDriver` interprets them against an in-process store (`memory`
//!   feature, enabled by default), mostly useful for tests.
//!
//! ```no_run
//! use rxredis::{Config, ReactiveRedisConnection};
//! use rxredis_core::zset::ReactiveZSetCommands;
//!
//! # async fn run() -> rxredis_core::Result<()> {
//! let connection = ReactiveRedisConnection::connect(&Config::from_env()).await?;
//! let added = connection
//!     .zset_commands()
//!     .z_add_one("leaderboard".into(), 42.0, "alice".into())
//!     .await?;
//! # let _ = added;
//! # Ok(())
//! # }
//! ```

mod commands;
mod config;
mod connection;
mod decode;
mod driver;
mod execute;

pub use commands::{RedisGeoCommands, RedisHyperLogLogCommands, RedisZSetCommands};
pub use config::Config;
pub use connection::ReactiveRedisConnection;
pub use driver::Driver;

#[cfg(feature = "memory")]
pub use driver::MemoryDriver;

#[cfg(feature = "connection-manager")]
pub use driver::RedisDriver;

pub use rxredis_core::{CommandError, CommandFailure, Result};
