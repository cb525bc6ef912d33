//! Response objects and the stream shapes shared by every command family.

use futures_util::stream::{self, BoxStream, StreamExt};

use crate::error::{CommandError, CommandFailure, Result};

/// Pairs an input command with the output decoded from its reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResponse<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> CommandResponse<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

/// Response carrying a number (count, rank or score).
pub type NumericResponse<I, N> = CommandResponse<I, N>;

/// Response carrying a boolean decoded from a status reply.
pub type BooleanResponse<I> = CommandResponse<I, bool>;

/// Response carrying an ordered list.
pub type MultiValueResponse<I, T> = CommandResponse<I, Vec<T>>;

/// One slot of a response stream: the response, or the failure of that command.
pub type CommandOutcome<C, O> = std::result::Result<CommandResponse<C, O>, CommandFailure<C>>;

/// Stream of command objects handed to an adapter.
pub type CommandStream<'a, C> = BoxStream<'a, C>;

/// Stream of outcomes returned by an adapter, one per input command.
pub type ResponseStream<'a, C, O> = BoxStream<'a, CommandOutcome<C, O>>;

/// Wraps a single command into a command stream.
pub fn once<'a, C: Send + 'a>(command: C) -> CommandStream<'a, C> {
    stream::iter(std::iter::once(command)).boxed()
}

/// Wraps a batch of commands into a command stream.
pub fn commands<'a, C, I>(commands: I) -> CommandStream<'a, C>
where
    C: Send + 'a,
    I: IntoIterator<Item = C>,
    I::IntoIter: Send + 'a,
{
    stream::iter(commands).boxed()
}

/// Resolves a single-command response stream into its output.
///
/// Used by the convenience methods that take plain arguments: the failure is
/// unwrapped into its error because the caller already knows the command.
pub async fn single_output<C, O>(
    mut responses: ResponseStream<'_, C, O>,
    command: &'static str,
) -> Result<O> {
    match responses.next().await {
        Some(Ok(response)) => Ok(response.into_output()),
        Some(Err(failure)) => Err(failure.into_error()),
        None => Err(CommandError::MissingResponse(command)),
    }
}
