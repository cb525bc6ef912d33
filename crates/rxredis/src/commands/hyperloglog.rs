use async_trait::async_trait;

use rxredis_core::hyperloglog::{
    PfAddCommand, PfCountCommand, PfMergeCommand, ReactiveHyperLogLogCommands,
};
use rxredis_core::{Command, CommandStream, ResponseStream, Result};

use super::{keyed, push_all};
use crate::decode;
use crate::driver::Driver;
use crate::execute::Executor;

/// HyperLogLog commands over a [`Driver`].
pub struct RedisHyperLogLogCommands<D> {
    executor: Executor<D>,
}

impl<D> RedisHyperLogLogCommands<D> {
    pub(crate) fn new(executor: Executor<D>) -> Self {
        Self { executor }
    }
}

fn pf_add(command: &PfAddCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    push_all(&mut cmd, &command.values);
    Ok(cmd)
}

fn pf_count(command: &PfCountCommand) -> Result<redis::Cmd> {
    let mut cmd = redis::cmd(command.name());
    push_all(&mut cmd, &command.keys);
    Ok(cmd)
}

fn pf_merge(command: &PfMergeCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    push_all(&mut cmd, &command.source_keys);
    Ok(cmd)
}

#[async_trait]
impl<D: Driver> ReactiveHyperLogLogCommands for RedisHyperLogLogCommands<D> {
    fn pf_add<'a>(
        &'a self,
        commands: CommandStream<'a, PfAddCommand>,
    ) -> ResponseStream<'a, PfAddCommand, i64> {
        self.executor
            .execute(commands, pf_add, |_, reply| decode::integer(reply))
    }

    fn pf_count<'a>(
        &'a self,
        commands: CommandStream<'a, PfCountCommand>,
    ) -> ResponseStream<'a, PfCountCommand, i64> {
        self.executor
            .execute(commands, pf_count, |_, reply| decode::integer(reply))
    }

    fn pf_merge<'a>(
        &'a self,
        commands: CommandStream<'a, PfMergeCommand>,
    ) -> ResponseStream<'a, PfMergeCommand, bool> {
        self.executor
            .execute(commands, pf_merge, |_, reply| decode::status(reply))
    }
}
