use async_trait::async_trait;
use tokio::sync::watch;

/// Platform connectivity signal. `subscribe` hands out a watch receiver
/// that observes every connected/disconnected transition; the orchestrator
/// additionally polls as a safety net against missed events.
#[async_trait]
pub trait ConnectivityMonitor: Send + Sync {
    async fn is_connected(&self) -> bool;
    fn subscribe(&self) -> watch::Receiver<bool>;
}
