use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use rxredis_core::Result;

use super::args::argv;
use super::store::Store;
use crate::driver::Driver;

/// Driver executing commands against an in-process store.
///
/// Clones share the same keyspace. Every command runs under the write lock,
/// so commands are atomic with respect to each other, as on a server.
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    store: Arc<RwLock<Store>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new())),
        }
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn execute(&self, cmd: redis::Cmd) -> Result<redis::Value> {
        let argv = argv(&cmd);
        let mut store = self.store.write().await;
        let reply = store.apply(&argv);
        trace!(args = argv.len(), ok = reply.is_ok(), "Memory driver executed command");
        reply
    }
}
