use async_trait::async_trait;

/// Connectivity precondition consulted before a send is started. Starting a
/// certain-to-fail call wastes retry budget on hosts where connectivity comes
/// and goes, so the worker waits until this reports online.
#[async_trait]
pub trait NetworkMonitor: Send + Sync {
    async fn is_online(&self) -> bool;
}
