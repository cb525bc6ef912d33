use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::range::Range;
use crate::response::{once, single_output, CommandStream, ResponseStream};

use super::{
    Limit, Tuple, ZAddCommand, ZCardCommand, ZCountCommand, ZIncrByCommand, ZRangeByScoreCommand,
    ZRangeCommand, ZRankCommand, ZRemCommand, ZRemRangeByRankCommand, ZRemRangeByScoreCommand,
    ZScoreCommand,
};

/// Reactive sorted-set commands.
///
/// Stream methods yield one outcome per input command. Outcomes are emitted
/// as replies arrive, so callers correlate them through `input`.
#[async_trait]
pub trait ReactiveZSetCommands: Send + Sync {
    /// Adds members. Outputs the number of added (or changed, with `CH`) members.
    fn z_add<'a>(
        &'a self,
        commands: CommandStream<'a, ZAddCommand>,
    ) -> ResponseStream<'a, ZAddCommand, i64>;

    /// Removes members. Outputs the number of members removed.
    fn z_rem<'a>(
        &'a self,
        commands: CommandStream<'a, ZRemCommand>,
    ) -> ResponseStream<'a, ZRemCommand, i64>;

    /// Increments the score of a member. Outputs the new score.
    fn z_incr_by<'a>(
        &'a self,
        commands: CommandStream<'a, ZIncrByCommand>,
    ) -> ResponseStream<'a, ZIncrByCommand, f64>;

    /// Rank of a member in either direction; `None` when it is absent.
    fn z_rank<'a>(
        &'a self,
        commands: CommandStream<'a, ZRankCommand>,
    ) -> ResponseStream<'a, ZRankCommand, Option<i64>>;

    /// Members within a rank range.
    fn z_range<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeCommand>,
    ) -> ResponseStream<'a, ZRangeCommand, Vec<Bytes>>;

    /// Members and scores within a rank range.
    fn z_range_with_scores<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeCommand>,
    ) -> ResponseStream<'a, ZRangeCommand, Vec<Tuple>>;

    /// Members within a score range.
    fn z_range_by_score<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeByScoreCommand>,
    ) -> ResponseStream<'a, ZRangeByScoreCommand, Vec<Bytes>>;

    /// Members and scores within a score range.
    fn z_range_by_score_with_scores<'a>(
        &'a self,
        commands: CommandStream<'a, ZRangeByScoreCommand>,
    ) -> ResponseStream<'a, ZRangeByScoreCommand, Vec<Tuple>>;

    /// Number of members within a score range.
    fn z_count<'a>(
        &'a self,
        commands: CommandStream<'a, ZCountCommand>,
    ) -> ResponseStream<'a, ZCountCommand, i64>;

    /// Number of members in the sorted set.
    fn z_card<'a>(
        &'a self,
        commands: CommandStream<'a, ZCardCommand>,
    ) -> ResponseStream<'a, ZCardCommand, i64>;

    /// Score of a member; `None` when it is absent.
    fn z_score<'a>(
        &'a self,
        commands: CommandStream<'a, ZScoreCommand>,
    ) -> ResponseStream<'a, ZScoreCommand, Option<f64>>;

    /// Removes members within a rank range. Outputs the number removed.
    fn z_rem_range_by_rank<'a>(
        &'a self,
        commands: CommandStream<'a, ZRemRangeByRankCommand>,
    ) -> ResponseStream<'a, ZRemRangeByRankCommand, i64>;

    /// Removes members within a score range. Outputs the number removed.
    fn z_rem_range_by_score<'a>(
        &'a self,
        commands: CommandStream<'a, ZRemRangeByScoreCommand>,
    ) -> ResponseStream<'a, ZRemRangeByScoreCommand, i64>;

    // ------------------------------------------------------------------------
    // Single-command conveniences
    // ------------------------------------------------------------------------

    async fn z_add_one(&self, key: Bytes, score: f64, value: Bytes) -> Result<i64> {
        let command = ZAddCommand::tuple(Tuple::new(value, score)).to(key);
        single_output(self.z_add(once(command)), "ZADD").await
    }

    async fn z_rem_values(&self, key: Bytes, values: Vec<Bytes>) -> Result<i64> {
        single_output(self.z_rem(once(ZRemCommand::values(values).from(key))), "ZREM").await
    }

    async fn z_incr_by_one(&self, key: Bytes, increment: f64, value: Bytes) -> Result<f64> {
        let command = ZIncrByCommand::score_of(value).by(increment).to(key);
        single_output(self.z_incr_by(once(command)), "ZINCRBY").await
    }

    async fn z_rank_of(&self, key: Bytes, value: Bytes) -> Result<Option<i64>> {
        let command = ZRankCommand::index_of(value).from(key);
        single_output(self.z_rank(once(command)), "ZRANK").await
    }

    async fn z_rev_rank_of(&self, key: Bytes, value: Bytes) -> Result<Option<i64>> {
        let command = ZRankCommand::reverse_index_of(value).from(key);
        single_output(self.z_rank(once(command)), "ZREVRANK").await
    }

    async fn z_range_of(&self, key: Bytes, range: Range<i64>) -> Result<Vec<Bytes>> {
        let command = ZRangeCommand::ranks_within(range).from(key);
        single_output(self.z_range(once(command)), "ZRANGE").await
    }

    async fn z_rev_range_of(&self, key: Bytes, range: Range<i64>) -> Result<Vec<Bytes>> {
        let command = ZRangeCommand::reverse_ranks_within(range).from(key);
        single_output(self.z_range(once(command)), "ZREVRANGE").await
    }

    async fn z_range_with_scores_of(&self, key: Bytes, range: Range<i64>) -> Result<Vec<Tuple>> {
        let command = ZRangeCommand::ranks_within(range).from(key);
        single_output(self.z_range_with_scores(once(command)), "ZRANGE").await
    }

    async fn z_rev_range_with_scores_of(
        &self,
        key: Bytes,
        range: Range<i64>,
    ) -> Result<Vec<Tuple>> {
        let command = ZRangeCommand::reverse_ranks_within(range).from(key);
        single_output(self.z_range_with_scores(once(command)), "ZREVRANGE").await
    }

    async fn z_range_by_score_of(
        &self,
        key: Bytes,
        range: Range<f64>,
        limit: Option<Limit>,
    ) -> Result<Vec<Bytes>> {
        let mut command = ZRangeByScoreCommand::scores_within(range).from(key);
        command.limit = limit;
        single_output(self.z_range_by_score(once(command)), "ZRANGEBYSCORE").await
    }

    async fn z_rev_range_by_score_of(
        &self,
        key: Bytes,
        range: Range<f64>,
        limit: Option<Limit>,
    ) -> Result<Vec<Bytes>> {
        let mut command = ZRangeByScoreCommand::reverse_scores_within(range).from(key);
        command.limit = limit;
        single_output(self.z_range_by_score(once(command)), "ZREVRANGEBYSCORE").await
    }

    async fn z_range_by_score_with_scores_of(
        &self,
        key: Bytes,
        range: Range<f64>,
        limit: Option<Limit>,
    ) -> Result<Vec<Tuple>> {
        let mut command = ZRangeByScoreCommand::scores_within(range).from(key);
        command.limit = limit;
        single_output(self.z_range_by_score_with_scores(once(command)), "ZRANGEBYSCORE").await
    }

    async fn z_rev_range_by_score_with_scores_of(
        &self,
        key: Bytes,
        range: Range<f64>,
        limit: Option<Limit>,
    ) -> Result<Vec<Tuple>> {
        let mut command = ZRangeByScoreCommand::reverse_scores_within(range).from(key);
        command.limit = limit;
        single_output(
            self.z_range_by_score_with_scores(once(command)),
            "ZREVRANGEBYSCORE",
        )
        .await
    }

    async fn z_count_in(&self, key: Bytes, range: Range<f64>) -> Result<i64> {
        let command = ZCountCommand::scores_within(range).from(key);
        single_output(self.z_count(once(command)), "ZCOUNT").await
    }

    async fn z_card_of(&self, key: Bytes) -> Result<i64> {
        single_output(self.z_card(once(ZCardCommand::new(key))), "ZCARD").await
    }

    async fn z_score_of(&self, key: Bytes, value: Bytes) -> Result<Option<f64>> {
        let command = ZScoreCommand::score_of(value).from(key);
        single_output(self.z_score(once(command)), "ZSCORE").await
    }

    async fn z_rem_range_by_rank_of(&self, key: Bytes, range: Range<i64>) -> Result<i64> {
        let command = ZRemRangeByRankCommand::values_within(range).from(key);
        single_output(self.z_rem_range_by_rank(once(command)), "ZREMRANGEBYRANK").await
    }

    async fn z_rem_range_by_score_of(&self, key: Bytes, range: Range<f64>) -> Result<i64> {
        let command = ZRemRangeByScoreCommand::scores_within(range).from(key);
        single_output(self.z_rem_range_by_score(once(command)), "ZREMRANGEBYSCORE").await
    }
}
