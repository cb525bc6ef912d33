//! In-memory driver.
//!
//! Interprets the subset of Redis the adapters emit against an in-process
//! keyspace. Replies mirror a real server's closely enough (geohash scores,
//! cell-centre positions, distance formula, error replies) that the same
//! test suite runs against either driver.

mod args;
mod driver;
mod store;

pub use driver::MemoryDriver;
