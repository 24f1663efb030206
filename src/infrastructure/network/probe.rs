use crate::application::ports::ConnectivityMonitor;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// Health-endpoint poller doubling as the connectivity signal. Platform
/// reachability callbacks (when the host app has them) feed
/// `set_connected` directly; the poll loop is the safety net against
/// missed events.
pub struct HttpConnectivityProbe {
    health_url: String,
    http: reqwest::Client,
    state: watch::Sender<bool>,
}

impl HttpConnectivityProbe {
    pub fn new(base_url: &str, request_timeout: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout))
            .build()?;
        let (state, _) = watch::channel(false);
        Ok(Self {
            health_url: format!("{}/health", base_url.trim_end_matches('/')),
            http,
            state,
        })
    }

    pub fn spawn_polling(self: &Arc<Self>, interval_secs: u64) {
        let probe = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
            loop {
                interval.tick().await;
                let connected = probe.probe_once().await;
                probe.set_connected(connected);
            }
        });
    }

    pub async fn probe_once(&self) -> bool {
        match self.http.get(&self.health_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Publishes the state, emitting a watch notification only on change.
    pub fn set_connected(&self, connected: bool) {
        let changed = self.state.send_if_modified(|current| {
            if *current != connected {
                *current = connected;
                true
            } else {
                false
            }
        });
        if changed {
            info!(
                "Connectivity changed: {}",
                if connected { "online" } else { "offline" }
            );
        }
    }
}

#[async_trait]
impl ConnectivityMonitor for HttpConnectivityProbe {
    async fn is_connected(&self) -> bool {
        *self.state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}
