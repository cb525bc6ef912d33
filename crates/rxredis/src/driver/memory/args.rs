//! Argument parsing for the in-memory interpreter.

use bytes::Bytes;
use redis::Arg;

use rxredis_core::{CommandError, Result};

/// Flattens a native command into its raw arguments, name first.
pub fn argv(cmd: &redis::Cmd) -> Vec<Bytes> {
    cmd.args_iter()
        .map(|arg| match arg {
            Arg::Simple(bytes) => Bytes::copy_from_slice(bytes),
            Arg::Cursor => Bytes::from_static(b"0"),
        })
        .collect()
}

/// Upper-cased command name.
pub fn command_name(argv: &[Bytes]) -> String {
    argv.first()
        .map(|name| String::from_utf8_lossy(name).to_ascii_uppercase())
        .unwrap_or_default()
}

pub fn server_error(message: impl Into<String>) -> CommandError {
    CommandError::ExecutionFailed(message.into())
}

pub fn wrong_type() -> CommandError {
    server_error("WRONGTYPE Operation against a key holding the wrong kind of value")
}

pub fn syntax_error() -> CommandError {
    server_error("ERR syntax error")
}

pub fn wrong_arity(name: &str) -> CommandError {
    server_error(format!(
        "ERR wrong number of arguments for '{}' command",
        name.to_ascii_lowercase()
    ))
}

pub fn is_option(arg: &[u8], option: &str) -> bool {
    arg.eq_ignore_ascii_case(option.as_bytes())
}

/// Parses a float argument, accepting `inf`, `+inf` and `-inf`.
pub fn parse_f64(arg: &[u8]) -> Result<f64> {
    let text = std::str::from_utf8(arg).map_err(|_| not_a_float())?;
    let value = match text.to_ascii_lowercase().as_str() {
        "inf" | "+inf" => f64::INFINITY,
        "-inf" => f64::NEG_INFINITY,
        other => other.parse::<f64>().map_err(|_| not_a_float())?,
    };
    if value.is_nan() {
        return Err(not_a_float());
    }
    Ok(value)
}

fn not_a_float() -> CommandError {
    server_error("ERR value is not a valid float")
}

pub fn parse_i64(arg: &[u8]) -> Result<i64> {
    std::str::from_utf8(arg)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or_else(|| server_error("ERR value is not an integer or out of range"))
}

/// A `min`/`max` argument of a score range query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBound {
    pub value: f64,
    pub exclusive: bool,
}

impl ScoreBound {
    /// Parses `2`, `(2`, `-inf` or `+inf`.
    pub fn parse(arg: &[u8]) -> Result<Self> {
        let (exclusive, rest) = match arg.split_first() {
            Some((b'(', rest)) => (true, rest),
            _ => (false, arg),
        };
        let value =
            parse_f64(rest).map_err(|_| server_error("ERR min or max is not a float"))?;
        Ok(Self { value, exclusive })
    }

    /// Returns true if `score` is on the inner side of this lower bound.
    pub fn admits_from_below(&self, score: f64) -> bool {
        if self.exclusive {
            score > self.value
        } else {
            score >= self.value
        }
    }

    /// Returns true if `score` is on the inner side of this upper bound.
    pub fn admits_from_above(&self, score: f64) -> bool {
        if self.exclusive {
            score < self.value
        } else {
            score <= self.value
        }
    }
}
