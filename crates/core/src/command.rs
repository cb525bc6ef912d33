use bytes::Bytes;

use crate::error::{CommandError, Result};

/// A command object that can be checked before it is sent.
///
/// Implementors are immutable value objects: they are built by the caller,
/// consumed once by an adapter and handed back inside the response.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// The native Redis command this object translates to.
    fn name(&self) -> &'static str;

    /// Checks the preconditions the driver would otherwise reject.
    fn validate(&self) -> Result<()>;
}

/// Returns the key or an `InvalidCommand` error naming the command.
pub fn required_key<'a>(command: &'static str, key: &'a Option<Bytes>) -> Result<&'a Bytes> {
    match key {
        Some(key) if !key.is_empty() => Ok(key),
        Some(_) => Err(CommandError::InvalidCommand(format!(
            "{}: key must not be empty",
            command
        ))),
        None => Err(CommandError::InvalidCommand(format!(
            "{}: key must not be null",
            command
        ))),
    }
}

/// Fails when a collection argument is empty.
pub(crate) fn require_non_empty<T>(command: &'static str, what: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(CommandError::InvalidCommand(format!(
            "{}: {} must not be empty",
            command, what
        )));
    }
    Ok(())
}

/// Fails when a key list is empty or holds an empty key.
pub(crate) fn require_keys(command: &'static str, what: &str, keys: &[Bytes]) -> Result<()> {
    require_non_empty(command, what, keys)?;
    if keys.iter().any(Bytes::is_empty) {
        return Err(CommandError::InvalidCommand(format!(
            "{}: {} must not contain empty keys",
            command, what
        )));
    }
    Ok(())
}

/// Fails when a number argument is NaN.
pub(crate) fn require_number(command: &'static str, what: &str, value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(CommandError::InvalidCommand(format!(
            "{}: {} must be a number",
            command, what
        )));
    }
    Ok(())
}
