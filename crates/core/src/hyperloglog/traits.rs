use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::response::{once, single_output, CommandStream, ResponseStream};

use super::{PfAddCommand, PfCountCommand, PfMergeCommand};

/// Reactive HyperLogLog commands.
///
/// Every stream method yields exactly one outcome per input command, in
/// completion order.
#[async_trait]
pub trait ReactiveHyperLogLogCommands: Send + Sync {
    /// Adds values to HyperLogLogs. The output is `1` if the estimate changed.
    fn pf_add<'a>(
        &'a self,
        commands: CommandStream<'a, PfAddCommand>,
    ) -> ResponseStream<'a, PfAddCommand, i64>;

    /// Returns the approximated cardinality of the union of the keys.
    fn pf_count<'a>(
        &'a self,
        commands: CommandStream<'a, PfCountCommand>,
    ) -> ResponseStream<'a, PfCountCommand, i64>;

    /// Merges source HyperLogLogs into a destination key.
    fn pf_merge<'a>(
        &'a self,
        commands: CommandStream<'a, PfMergeCommand>,
    ) -> ResponseStream<'a, PfMergeCommand, bool>;

    async fn pf_add_values(&self, key: Bytes, values: Vec<Bytes>) -> Result<i64> {
        single_output(self.pf_add(once(PfAddCommand::values(values).to(key))), "PFADD").await
    }

    async fn pf_count_keys(&self, keys: Vec<Bytes>) -> Result<i64> {
        single_output(self.pf_count(once(PfCountCommand::values_in(keys))), "PFCOUNT").await
    }

    async fn pf_merge_into(&self, destination: Bytes, source_keys: Vec<Bytes>) -> Result<bool> {
        let command = PfMergeCommand::values_in(source_keys).into_key(destination);
        single_output(self.pf_merge(once(command)), "PFMERGE").await
    }
}
