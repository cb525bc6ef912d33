//! Sorted-set command objects and the reactive command trait.

mod commands;
mod traits;
mod tuple;

pub use commands::{
    Direction, Limit, ZAddCommand, ZAddCondition, ZCardCommand, ZCountCommand, ZIncrByCommand,
    ZRangeByScoreCommand, ZRangeCommand, ZRankCommand, ZRemCommand, ZRemRangeByRankCommand,
    ZRemRangeByScoreCommand, ZScoreCommand,
};
pub use traits::ReactiveZSetCommands;
pub use tuple::Tuple;
