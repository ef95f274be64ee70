use async_trait::async_trait;

use crate::domain::events::ForwardMessageEvent;

/// Hand-off point between ingestion and the delivery worker. `publish` must
/// not block on network I/O; ingestion can run on a shared dispatch context.
#[async_trait]
pub trait ForwardQueue: Send + Sync {
    async fn publish(&self, event: ForwardMessageEvent) -> anyhow::Result<()>;
}
