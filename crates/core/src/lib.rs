//! rxredis_core - pure types for reactive Redis command adapters.
//!
//! This crate holds the functional core: command objects, response objects,
//! ranges, geo math and the per-family reactive command traits. It performs
//! no I/O; the `rxredis` crate implements the traits on top of a Redis driver.

mod command;

pub mod error;
pub mod geo;
pub mod hyperloglog;
pub mod range;
pub mod response;
pub mod zset;

pub use command::{required_key, Command};
pub use error::{CommandError, CommandFailure, Result};
pub use range::{Bound, Range};
pub use response::{
    commands, once, single_output, BooleanResponse, CommandOutcome, CommandResponse,
    CommandStream, MultiValueResponse, NumericResponse, ResponseStream,
};
