use async_trait::async_trait;
use bytes::Bytes;

use rxredis_core::range::format_score;
use rxredis_core::zset::{
    ReactiveZSetCommands, Tuple, ZAddCommand, ZAddCondition, ZCardCommand, ZCountCommand,
    ZIncrByCommand, ZRangeByScoreCommand, ZRangeCommand, ZRankCommand, ZRemCommand,
    ZRemRangeByRankCommand, ZRemRangeByScoreCommand, ZScoreCommand,
};
use rxredis_core::{Command, CommandError, CommandStream, ResponseStream, Result};

use super::{keyed, push_all};
use crate::decode;
use crate::driver::Driver;
use crate::execute::Executor;

/// Sorted-set commands over a [`Driver`].
pub struct RedisZSetCommands<D> {
    executor: Executor<D>,
}

impl<D> RedisZSetCommands<D> {
    pub(crate) fn new(executor: Executor<D>) -> Self {
        Self { executor }
    }
}

// ============================================================================
// Translation
// ============================================================================

fn z_add(command: &ZAddCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    match command.condition {
        Some(ZAddCondition::IfNotExists) => {
            cmd.arg("NX");
        }
        Some(ZAddCondition::IfExists) => {
            cmd.arg("XX");
        }
        None => {}
    }
    if command.return_changed {
        cmd.arg("CH");
    }
    for Tuple { value, score } in &command.tuples {
        cmd.arg(format_score(*score)).arg(&value[..]);
    }
    Ok(cmd)
}

fn z_rem(command: &ZRemCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    push_all(&mut cmd, &command.values);
    Ok(cmd)
}

fn z_incr_by(command: &ZIncrByCommand) -> Result<redis::Cmd> {
    let increment = command.increment.ok_or_else(|| {
        CommandError::InvalidCommand("ZINCRBY: increment must not be null".to_string())
    })?;
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(format_score(increment)).arg(&command.value[..]);
    Ok(cmd)
}

fn z_rank(command: &ZRankCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(&command.value[..]);
    Ok(cmd)
}

fn z_range(command: &ZRangeCommand) -> Result<redis::Cmd> {
    let (start, stop) = command.range.to_rank_indices();
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(start).arg(stop);
    Ok(cmd)
}

fn z_range_with_scores(command: &ZRangeCommand) -> Result<redis::Cmd> {
    let mut cmd = z_range(command)?;
    cmd.arg("WITHSCORES");
    Ok(cmd)
}

fn z_range_by_score_args(command: &ZRangeByScoreCommand, with_scores: bool) -> Result<redis::Cmd> {
    let (min, max) = command.range.to_score_args();
    let mut cmd = keyed(command.name(), &command.key)?;
    // Reverse queries take `max` first.
    if command.direction.is_reverse() {
        cmd.arg(max).arg(min);
    } else {
        cmd.arg(min).arg(max);
    }
    if with_scores {
        cmd.arg("WITHSCORES");
    }
    if let Some(limit) = command.limit {
        cmd.arg("LIMIT").arg(limit.offset).arg(limit.count);
    }
    Ok(cmd)
}

fn z_range_by_score(command: &ZRangeByScoreCommand) -> Result<redis::Cmd> {
    z_range_by_score_args(command, false)
}

fn z_range_by_score_with_scores(command: &ZRangeByScoreCommand) -> Result<redis::Cmd> {
    z_range_by_score_args(command, true)
}

fn z_count(command: &ZCountCommand) -> Result<redis::Cmd> {
    let (min, max) = command.range.to_score_args();
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(min).arg(max);
    Ok(cmd)
}

fn z_card(command: &ZCardCommand) -> Result<redis::Cmd> {
    keyed(command.name(), &command.key)
}

fn z_score(command: &ZScoreCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(&command.value[..]);
    Ok(cmd)
}

fn z_rem_range_by_rank(command: &ZRemRangeByRankCommand) -> Result<redis::Cmd> {
    let (start, stop) = command.range.to_rank_indices();
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(start).arg(stop);
    Ok(cmd)
}

fn z_rem_range_by_score(command: &ZRemRangeByScoreCommand) -> Result<redis::Cmd> {
    let (min, max) = command.range.to_score_args();
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(min).arg(max);
    Ok(cmd)
}

// ============================================================================
// Adapter
// ============================================================================

#[async_trait]
impl<D: Driver> ReactiveZSetCommands for RedisZSetCommands<D> {
    fn z_add<'a>(
        &'a self,
        commands: CommandStream<'a, ZAddCommand>,
    ) -> ResponseStream<'a, ZAddCommand, i64> {
        self.executor
            .execute(commands, z_add, |_, reply| decode::integer(reply))
    }

    fn z_rem<'a>(
        &'a self,
        commands: CommandStream<'a, ZRemCommand>,
    ) -> ResponseStream<'a, ZRemCommand, i64> {
        self.executor
            .execute(commands, z_rem, |_, reply| decode::integer(reply))
    }

    fn z_incr_by<'a>(
        &'a self,
        commands: CommandStream<'a, ZIncrByCommand>,
    ) -> ResponseStream<'a, ZIncrByCommand, f64> {
        self.executor
            .execute(commands, z_incr_by, |_, reply| decode::score(reply))
    }

    fn z_rank<'a>(
        &'a self,
        commands: CommandStream<'a, ZRankCommand>,
    ) -> ResponseStream<'a, ZRankCommand, Option<i64>> {
        self.executor
            .execute(commands, z_rank, |_, reply| decode::optional_integer(reply))
    }

    fn z_range<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeCommand>,
    ) -> ResponseStream<'a, ZRangeCommand, Vec<Bytes>> {
        self.executor
            .execute(commands, z_range, |_, reply| decode::members(reply))
    }

    fn z_range_with_scores<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeCommand>,
    ) -> ResponseStream<'a, ZRangeCommand, Vec<Tuple>> {
        self.executor
            .execute(commands, z_range_with_scores, |_, reply| decode::tuples(reply))
    }

    fn z_range_by_score<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeByScoreCommand>,
    ) -> ResponseStream<'a, ZRangeByScoreCommand, Vec<Bytes>> {
        self.executor
            .execute(commands, z_range_by_score, |_, reply| decode::members(reply))
    }

    fn z_range_by_score_with_scores<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeByScoreCommand>,
    ) -> ResponseStream<'a, ZRangeByScoreCommand, Vec<Tuple>> {
        self.executor
            .execute(commands, z_range_by_score_with_scores, |_, reply| {
                decode::tuples(reply)
            })
    }

    fn z_count<'a>(
        &'a self,
        commands: CommandStream<'a, ZCountCommand>,
    ) -> ResponseStream<'a, ZCountCommand, i64> {
        self.executor
            .execute(commands, z_count, |_, reply| decode::integer(reply))
    }

    fn z_card<'a>(
        &'a self,
        commands: CommandStream<'a, ZCardCommand>,
    ) -> ResponseStream<'a, ZCardCommand, i64> {
        self.executor
            .execute(commands, z_card, |_, reply| decode::integer(reply))
    }

    fn z_score<'a>(
        &'a self,
        commands: CommandStream<'a, ZScoreCommand>,
    ) -> ResponseStream<'a, ZScoreCommand, Option<f64>> {
        self.executor
            .execute(commands, z_score, |_, reply| decode::optional_score(reply))
    }

    fn z_rem_range_by_rank<'a>(
        &'a self,
        commands: CommandStream<'a, ZRemRangeByRankCommand>,
    ) -> ResponseStream<'a, ZRemRangeByRankCommand, i64> {
        self.executor
            .execute(commands, z_rem_range_by_rank, |_, reply| decode::integer(reply))
    }

    fn z_rem_range_by_score<'a>(
        &'a self,
        commands: CommandStream<'a, ZRemRangeByScoreCommand>,
    ) -> ResponseStream<'a, ZRemRangeByScoreCommand, i64> {
        self.executor
            .execute(commands, z_rem_range_by_score, |_, reply| decode::integer(reply))
    }
}

#[cfg(test)]
mod tests {
    use rxredis_core::zset::Limit;
    use rxredis_core::Range;

    use super::*;
    use crate::commands::args_of;

    #[test]
    fn test_translate_z_add_with_flags() {
        let command = ZAddCommand::tuples([Tuple::new("a", 1.0), Tuple::new("b", 2.5)])
            .to("z")
            .if_exists()
            .return_changed();
        let cmd = z_add(&command).unwrap();
        assert_eq!(args_of(&cmd), ["ZADD", "z", "XX", "CH", "1", "a", "2.5", "b"]);
    }

    #[test]
    fn test_translate_z_incr_by() {
        let command = ZIncrByCommand::score_of("a").by(-1.5).to("z");
        let cmd = z_incr_by(&command).unwrap();
        assert_eq!(args_of(&cmd), ["ZINCRBY", "z", "-1.5", "a"]);
    }

    #[test]
    fn test_translate_rank_direction() {
        let cmd = z_rank(&ZRankCommand::reverse_index_of("a").from("z")).unwrap();
        assert_eq!(args_of(&cmd), ["ZREVRANK", "z", "a"]);
    }

    #[test]
    fn test_translate_rank_range() {
        let command = ZRangeCommand::ranks_within(Range::closed(1, 2)).from("z");
        assert_eq!(args_of(&z_range(&command).unwrap()), ["ZRANGE", "z", "1", "2"]);

        let command = ZRangeCommand::reverse_ranks_within(Range::at_least(1)).from("z");
        assert_eq!(
            args_of(&z_range_with_scores(&command).unwrap()),
            ["ZREVRANGE", "z", "1", "-1", "WITHSCORES"]
        );
    }

    #[test]
    fn test_translate_score_range() {
        let command = ZRangeByScoreCommand::scores_within(Range::closed(2.0, 3.0)).from("z");
        assert_eq!(
            args_of(&z_range_by_score(&command).unwrap()),
            ["ZRANGEBYSCORE", "z", "2", "3"]
        );
    }

    #[test]
    fn test_translate_reverse_score_range_puts_max_first() {
        // Written high-to-low or low-to-high, the same scores are selected.
        for range in [Range::closed(3.0, 2.0), Range::closed(2.0, 3.0)] {
            let command = ZRangeByScoreCommand::reverse_scores_within(range).from("z");
            assert_eq!(
                args_of(&z_range_by_score(&command).unwrap()),
                ["ZREVRANGEBYSCORE", "z", "3", "2"]
            );
        }
    }

    #[test]
    fn test_translate_score_range_with_limit_and_infinity() {
        let command = ZRangeByScoreCommand::scores_within(Range::new(
            rxredis_core::Bound::Exclusive(f64::NEG_INFINITY),
            rxredis_core::Bound::Exclusive(5.0),
        ))
        .limit_to(Limit::new(0, 10))
        .from("z");
        assert_eq!(
            args_of(&z_range_by_score_with_scores(&command).unwrap()),
            ["ZRANGEBYSCORE", "z", "-inf", "(5", "WITHSCORES", "LIMIT", "0", "10"]
        );
    }

    #[test]
    fn test_translate_z_card() {
        assert_eq!(
            args_of(&z_card(&ZCardCommand::new("z")).unwrap()),
            ["ZCARD", "z"]
        );
    }

    #[test]
    fn test_translate_empty_rank_range() {
        let command = ZRangeCommand::ranks_within(0..0).from("z");
        assert_eq!(args_of(&z_range(&command).unwrap()), ["ZRANGE", "z", "1", "0"]);
        let command = ZRemRangeByRankCommand::values_within(Range::less_than(0)).from("z");
        assert_eq!(
            args_of(&z_rem_range_by_rank(&command).unwrap()),
            ["ZREMRANGEBYRANK", "z", "1", "0"]
        );
    }

    #[test]
    fn test_translate_removals() {
        let by_rank = ZRemRangeByRankCommand::values_within(Range::closed(0, 1)).from("z");
        assert_eq!(
            args_of(&z_rem_range_by_rank(&by_rank).unwrap()),
            ["ZREMRANGEBYRANK", "z", "0", "1"]
        );
        let by_score = ZRemRangeByScoreCommand::scores_within(Range::at_most(2.0)).from("z");
        assert_eq!(
            args_of(&z_rem_range_by_score(&by_score).unwrap()),
            ["ZREMRANGEBYSCORE", "z", "-inf", "2"]
        );
    }
}
