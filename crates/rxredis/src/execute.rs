//! Streaming correlation between commands and replies.
//!
//! Every incoming command becomes one future that validates, translates,
//! executes and decodes it, and owns the command throughout. Futures run
//! concurrently up to `max_in_flight` and their outcomes are yielded as they
//! complete, so a slow command never holds back the replies of the others.
//! Dropping the returned stream drops the pending futures, which cancels the
//! calls still in flight.

use std::fmt::Debug;
use std::sync::Arc;

use futures_util::stream::StreamExt;
use tracing::{debug, trace, warn};

use rxredis_core::{
    Command, CommandFailure, CommandOutcome, CommandResponse, CommandStream, ResponseStream,
    Result,
};

use crate::driver::Driver;

/// Converts a validated command into the native call.
pub(crate) type Translate<C> = fn(&C) -> Result<redis::Cmd>;

/// Converts the raw reply of a command into its output.
pub(crate) type Decode<C, T> = fn(&C, redis::Value) -> Result<T>;

/// Shared execution settings handed to every adapter.
pub(crate) struct Executor<D> {
    driver: Arc<D>,
    max_in_flight: usize,
}

impl<D> Clone for Executor<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            max_in_flight: self.max_in_flight,
        }
    }
}

impl<D: Driver> Executor<D> {
    pub(crate) fn new(driver: Arc<D>, max_in_flight: usize) -> Self {
        Self {
            driver,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub(crate) fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Runs every command of the stream and yields one outcome per command.
    pub(crate) fn execute<'a, C, T>(
        &'a self,
        commands: CommandStream<'a, C>,
        translate: Translate<C>,
        decode: Decode<C, T>,
    ) -> ResponseStream<'a, C, T>
    where
        C: Command + 'a,
        T: Debug + Send + 'a,
    {
        let driver = self.driver.as_ref();
        commands
            .map(move |command| run(driver, command, translate, decode))
            .buffer_unordered(self.max_in_flight)
            .boxed()
    }
}

async fn run<D, C, T>(
    driver: &D,
    command: C,
    translate: Translate<C>,
    decode: Decode<C, T>,
) -> CommandOutcome<C, T>
where
    D: Driver,
    C: Command,
    T: Debug,
{
    match dispatch(driver, &command, translate, decode).await {
        Ok(output) => {
            trace!(command = command.name(), output = ?output, "Command completed");
            Ok(CommandResponse::new(command, output))
        }
        Err(error) => {
            warn!(command = command.name(), error = %error, "Command failed");
            Err(CommandFailure::new(command, error))
        }
    }
}

async fn dispatch<D, C, T>(
    driver: &D,
    command: &C,
    translate: Translate<C>,
    decode: Decode<C, T>,
) -> Result<T>
where
    D: Driver,
    C: Command,
{
    command.validate()?;
    let cmd = translate(command)?;
    debug!(command = command.name(), "Dispatching command");
    let reply = driver.execute(cmd).await?;
    decode(command, reply)
}
