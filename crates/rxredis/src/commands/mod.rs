//! Per-family adapters.
//!
//! Each adapter pairs a translator (command object to `redis::Cmd`) with a
//! decoder (raw reply to output) for every operation and hands both to the
//! shared executor.

mod geo;
mod hyperloglog;
mod zset;

pub use geo::RedisGeoCommands;
pub use hyperloglog::RedisHyperLogLogCommands;
pub use zset::RedisZSetCommands;

use bytes::Bytes;
use rxredis_core::{required_key, Result};

/// Starts a native command named `name` with the required key as its first argument.
fn keyed(name: &'static str, key: &Option<Bytes>) -> Result<redis::Cmd> {
    let key = required_key(name, key)?;
    let mut cmd = redis::cmd(name);
    cmd.arg(&key[..]);
    Ok(cmd)
}

/// Appends raw byte arguments.
fn push_all<'b>(cmd: &mut redis::Cmd, args: impl IntoIterator<Item = &'b Bytes>) {
    for arg in args {
        cmd.arg(&arg[..]);
    }
}

/// Arguments of a native command as text, name first.
#[cfg(test)]
fn args_of(cmd: &redis::Cmd) -> Vec<String> {
    cmd.args_iter()
        .map(|arg| match arg {
            redis::Arg::Simple(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            redis::Arg::Cursor => "0".to_string(),
        })
        .collect()
}
