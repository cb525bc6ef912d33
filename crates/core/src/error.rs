use thiserror::Error;

/// Errors that can occur while executing a single command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command was rejected before any call was issued.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// The server answered with an error reply.
    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),
    /// The reply did not have the shape the command expects.
    #[error("Unexpected reply: {0}")]
    Decode(String),
    #[error("No response received for {0}")]
    MissingResponse(&'static str),
}

impl CommandError {
    /// Returns true if the error was raised before reaching the driver.
    pub fn is_precondition(&self) -> bool {
        matches!(self, CommandError::InvalidCommand(_))
    }
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, CommandError>;

/// A command error attributed to the command that caused it.
///
/// Response streams yield this in the slot of the failed command, so
/// callers can tell which command failed without losing its siblings.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{error}")]
pub struct CommandFailure<C> {
    pub command: C,
    #[source]
    pub error: CommandError,
}

impl<C> CommandFailure<C> {
    pub fn new(command: C, error: CommandError) -> Self {
        Self { command, error }
    }

    /// Drops the command and keeps only the error.
    pub fn into_error(self) -> CommandError {
        self.error
    }
}
