use bytes::Bytes;

use crate::command::{require_non_empty, require_number, required_key, Command};
use crate::error::{CommandError, Result};
use crate::range::Range;

use super::Tuple;

/// Order in which the store returns members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ascending score (lowest rank first).
    #[default]
    Asc,
    /// Descending score.
    Desc,
}

impl Direction {
    pub fn is_reverse(self) -> bool {
        self == Direction::Desc
    }
}

/// `LIMIT offset count` for score range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: i64,
    pub count: i64,
}

impl Limit {
    pub fn new(offset: i64, count: i64) -> Self {
        Self { offset, count }
    }
}

fn require_score_range(command: &'static str, range: &Range<f64>) -> Result<()> {
    if range.has_nan() {
        return Err(CommandError::InvalidCommand(format!(
            "{}: range bounds must be numbers",
            command
        )));
    }
    Ok(())
}

// ============================================================================
// ZADD / ZREM / ZINCRBY
// ============================================================================

/// Update condition for `ZADD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZAddCondition {
    /// `NX`: only add new members.
    IfNotExists,
    /// `XX`: only update existing members.
    IfExists,
}

/// `ZADD key [NX|XX] [CH] score member [score member ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct ZAddCommand {
    pub key: Option<Bytes>,
    pub tuples: Vec<Tuple>,
    pub condition: Option<ZAddCondition>,
    /// Count changed members instead of added ones (`CH`).
    pub return_changed: bool,
}

impl ZAddCommand {
    pub fn tuple(tuple: Tuple) -> Self {
        Self::tuples([tuple])
    }

    pub fn tuples(tuples: impl IntoIterator<Item = Tuple>) -> Self {
        Self {
            key: None,
            tuples: tuples.into_iter().collect(),
            condition: None,
            return_changed: false,
        }
    }

    pub fn to(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.condition = Some(ZAddCondition::IfNotExists);
        self
    }

    pub fn if_exists(mut self) -> Self {
        self.condition = Some(ZAddCondition::IfExists);
        self
    }

    pub fn return_changed(mut self) -> Self {
        self.return_changed = true;
        self
    }
}

impl Command for ZAddCommand {
    fn name(&self) -> &'static str {
        "ZADD"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_non_empty(self.name(), "tuples", &self.tuples)?;
        self.tuples
            .iter()
            .try_for_each(|tuple| require_number(self.name(), "score", tuple.score))
    }
}

/// `ZREM key member [member ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZRemCommand {
    pub key: Option<Bytes>,
    pub values: Vec<Bytes>,
}

impl ZRemCommand {
    pub fn value(value: impl Into<Bytes>) -> Self {
        Self::values([value.into()])
    }

    pub fn values(values: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            key: None,
            values: values.into_iter().collect(),
        }
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZRemCommand {
    fn name(&self) -> &'static str {
        "ZREM"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_non_empty(self.name(), "values", &self.values)
    }
}

/// `ZINCRBY key increment member`
#[derive(Debug, Clone, PartialEq)]
pub struct ZIncrByCommand {
    pub key: Option<Bytes>,
    pub value: Bytes,
    pub increment: Option<f64>,
}

impl ZIncrByCommand {
    pub fn score_of(value: impl Into<Bytes>) -> Self {
        Self {
            key: None,
            value: value.into(),
            increment: None,
        }
    }

    pub fn by(mut self, increment: f64) -> Self {
        self.increment = Some(increment);
        self
    }

    pub fn to(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZIncrByCommand {
    fn name(&self) -> &'static str {
        "ZINCRBY"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        let Some(increment) = self.increment else {
            return Err(CommandError::InvalidCommand(
                "ZINCRBY: increment must not be null".to_string(),
            ));
        };
        require_number(self.name(), "increment", increment)
    }
}

// ============================================================================
// Rank and score lookups
// ============================================================================

/// `ZRANK` / `ZREVRANK key member`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZRankCommand {
    pub key: Option<Bytes>,
    pub value: Bytes,
    pub direction: Direction,
}

impl ZRankCommand {
    pub fn index_of(value: impl Into<Bytes>) -> Self {
        Self {
            key: None,
            value: value.into(),
            direction: Direction::Asc,
        }
    }

    pub fn reverse_index_of(value: impl Into<Bytes>) -> Self {
        Self {
            direction: Direction::Desc,
            ..Self::index_of(value)
        }
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZRankCommand {
    fn name(&self) -> &'static str {
        if self.direction.is_reverse() {
            "ZREVRANK"
        } else {
            "ZRANK"
        }
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key).map(|_| ())
    }
}

/// `ZSCORE key member`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZScoreCommand {
    pub key: Option<Bytes>,
    pub value: Bytes,
}

impl ZScoreCommand {
    pub fn score_of(value: impl Into<Bytes>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZScoreCommand {
    fn name(&self) -> &'static str {
        "ZSCORE"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key).map(|_| ())
    }
}

// ============================================================================
// Range queries
// ============================================================================

/// `ZRANGE` / `ZREVRANGE key start stop [WITHSCORES]`
#[derive(Debug, Clone, PartialEq)]
pub struct ZRangeCommand {
    pub key: Option<Bytes>,
    pub range: Range<i64>,
    pub direction: Direction,
}

impl ZRangeCommand {
    /// Members whose rank falls within `range`, lowest score first.
    pub fn ranks_within(range: impl Into<Range<i64>>) -> Self {
        Self {
            key: None,
            range: range.into(),
            direction: Direction::Asc,
        }
    }

    /// Members whose reverse rank falls within `range`, highest score first.
    pub fn reverse_ranks_within(range: impl Into<Range<i64>>) -> Self {
        Self {
            direction: Direction::Desc,
            ..Self::ranks_within(range)
        }
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZRangeCommand {
    fn name(&self) -> &'static str {
        if self.direction.is_reverse() {
            "ZREVRANGE"
        } else {
            "ZRANGE"
        }
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key).map(|_| ())
    }
}

/// `ZRANGEBYSCORE key min max` / `ZREVRANGEBYSCORE key max min`
#[derive(Debug, Clone, PartialEq)]
pub struct ZRangeByScoreCommand {
    pub key: Option<Bytes>,
    pub range: Range<f64>,
    pub direction: Direction,
    pub limit: Option<Limit>,
}

impl ZRangeByScoreCommand {
    /// Members whose score falls within `range`, lowest score first.
    pub fn scores_within(range: impl Into<Range<f64>>) -> Self {
        Self {
            key: None,
            range: range.into(),
            direction: Direction::Asc,
            limit: None,
        }
    }

    /// Members whose score falls within `range`, highest score first.
    pub fn reverse_scores_within(range: impl Into<Range<f64>>) -> Self {
        Self {
            direction: Direction::Desc,
            ..Self::scores_within(range)
        }
    }

    pub fn limit_to(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZRangeByScoreCommand {
    fn name(&self) -> &'static str {
        if self.direction.is_reverse() {
            "ZREVRANGEBYSCORE"
        } else {
            "ZRANGEBYSCORE"
        }
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_score_range(self.name(), &self.range)
    }
}

/// `ZCOUNT key min max`
#[derive(Debug, Clone, PartialEq)]
pub struct ZCountCommand {
    pub key: Option<Bytes>,
    pub range: Range<f64>,
}

impl ZCountCommand {
    pub fn scores_within(range: impl Into<Range<f64>>) -> Self {
        Self {
            key: None,
            range: range.into(),
        }
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZCountCommand {
    fn name(&self) -> &'static str {
        "ZCOUNT"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_score_range(self.name(), &self.range)
    }
}

/// `ZCARD key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZCardCommand {
    pub key: Option<Bytes>,
}

impl ZCardCommand {
    pub fn new(key: impl Into<Bytes>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }
}

impl Command for ZCardCommand {
    fn name(&self) -> &'static str {
        "ZCARD"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key).map(|_| ())
    }
}

// ============================================================================
// Range removal
// ============================================================================

/// `ZREMRANGEBYRANK key start stop`
#[derive(Debug, Clone, PartialEq)]
pub struct ZRemRangeByRankCommand {
    pub key: Option<Bytes>,
    pub range: Range<i64>,
}

impl ZRemRangeByRankCommand {
    pub fn values_within(range: impl Into<Range<i64>>) -> Self {
        Self {
            key: None,
            range: range.into(),
        }
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZRemRangeByRankCommand {
    fn name(&self) -> &'static str {
        "ZREMRANGEBYRANK"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key).map(|_| ())
    }
}

/// `ZREMRANGEBYSCORE key min max`
#[derive(Debug, Clone, PartialEq)]
pub struct ZRemRangeByScoreCommand {
    pub key: Option<Bytes>,
    pub range: Range<f64>,
}

impl ZRemRangeByScoreCommand {
    pub fn scores_within(range: impl Into<Range<f64>>) -> Self {
        Self {
            key: None,
            range: range.into(),
        }
    }

    pub fn from(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for ZRemRangeByScoreCommand {
    fn name(&self) -> &'static str {
        "ZREMRANGEBYSCORE"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_score_range(self.name(), &self.range)
    }
}
