//! Driver backed by a live Redis server.
//!
//! Multiplexing and reconnection are delegated to the client's
//! `ConnectionManager`.

mod driver;
mod error;

pub use driver::RedisDriver;
