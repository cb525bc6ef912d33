//! HyperLogLog command objects and the reactive command trait.

mod commands;
mod traits;

pub use commands::{PfAddCommand, PfCountCommand, PfMergeCommand};
pub use traits::ReactiveHyperLogLogCommands;
