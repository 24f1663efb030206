use crate::application::ports::MutationPusher;
use crate::domain::entities::retry::{RetryKey, RetryQueueItem};
use crate::domain::value_objects::RetryState;
use crate::shared::config::SyncConfig;
use crate::shared::error::AppError;
use chrono::Utc;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

pub const MAX_AUTO_RETRIES: u32 = 3;

/// Default backoff table, indexed by retry_count - 1 and clamped to the
/// last entry. Delays are non-decreasing up to the ceiling.
const DEFAULT_BACKOFF_SECS: [u64; 4] = [10, 30, 60, 120];

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_auto_retries: u32,
    pub backoff: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_auto_retries: MAX_AUTO_RETRIES,
            backoff: DEFAULT_BACKOFF_SECS
                .iter()
                .map(|secs| Duration::from_secs(*secs))
                .collect(),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            max_auto_retries: config.max_auto_retries,
            backoff: config
                .retry_backoff
                .iter()
                .map(|secs| Duration::from_secs(*secs))
                .collect(),
        }
    }

    pub fn delay_for(&self, retry_count: u32) -> Duration {
        if self.backoff.is_empty() {
            return Duration::ZERO;
        }
        let index = (retry_count.saturating_sub(1) as usize).min(self.backoff.len() - 1);
        self.backoff[index]
    }
}

/// In-memory, per-item retry tracking for equipment configuration
/// submissions: responsive status for the list view, exponential backoff
/// for transient failures, manual re-trigger once the budget is exhausted.
/// Drives items through the same push primitive as the bulk orchestrator.
pub struct RetryQueueManager {
    items: RwLock<HashMap<RetryKey, RetryQueueItem>>,
    pusher: Arc<dyn MutationPusher>,
    policy: RetryPolicy,
    events: broadcast::Sender<RetryKey>,
}

impl RetryQueueManager {
    pub fn new(pusher: Arc<dyn MutationPusher>, policy: RetryPolicy) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            items: RwLock::new(HashMap::new()),
            pusher,
            policy,
            events,
        })
    }

    /// Starts tracking an item. Re-enqueuing a key that is already syncing
    /// or synced is a no-op returning the tracked item.
    pub async fn enqueue(&self, key: RetryKey) -> RetryQueueItem {
        let mut items = self.items.write().await;
        if let Some(existing) = items.get(&key) {
            return existing.clone();
        }
        let item = RetryQueueItem::new(key);
        items.insert(key, item.clone());
        drop(items);
        self.notify(key);
        item
    }

    /// One attempt for one item. Skips keys that are untracked, already
    /// syncing (the per-key processing guard) or already synced.
    pub async fn process_item(self: &Arc<Self>, key: RetryKey) {
        {
            let mut items = self.items.write().await;
            let item = match items.get_mut(&key) {
                Some(item) => item,
                None => return,
            };
            if matches!(item.state, RetryState::Syncing | RetryState::Synced) {
                return;
            }
            item.state = RetryState::Syncing;
            item.last_attempt = Some(Utc::now());
            item.next_retry = None;
        }
        self.notify(key);

        let result = self.pusher.push_one(key.family, key.id).await;
        self.record_outcome(key, result).await;
    }

    async fn record_outcome(self: &Arc<Self>, key: RetryKey, result: Result<(), AppError>) {
        let mut schedule: Option<Duration> = None;
        {
            let mut items = self.items.write().await;
            let item = match items.get_mut(&key) {
                Some(item) => item,
                None => return,
            };
            match result {
                Ok(()) => {
                    item.state = RetryState::Synced;
                    item.error_message = None;
                    item.next_retry = None;
                    info!("Retry item {} {} synced", key.family, key.id);
                }
                Err(err) if err.is_fatal() => {
                    // Terminal: no further automatic scheduling.
                    item.state = RetryState::FatalError;
                    item.error_message = Some(err.to_string());
                    item.next_retry = None;
                    warn!("Retry item {} {} failed fatally: {}", key.family, key.id, err);
                }
                Err(err) => {
                    item.retry_count += 1;
                    item.state = RetryState::Error;
                    item.error_message = Some(err.to_string());
                    if item.retry_count < self.policy.max_auto_retries {
                        let delay = self.policy.delay_for(item.retry_count);
                        item.next_retry = Some(
                            Utc::now()
                                + chrono::Duration::from_std(delay)
                                    .unwrap_or_else(|_| chrono::Duration::zero()),
                        );
                        schedule = Some(delay);
                        debug!(
                            "Retry item {} {} rescheduled in {:?} (attempt {})",
                            key.family, key.id, delay, item.retry_count
                        );
                    } else {
                        // Budget exhausted; waits for a manual retry.
                        item.next_retry = None;
                        warn!(
                            "Retry item {} {} exhausted {} attempts: {}",
                            key.family, key.id, item.retry_count, err
                        );
                    }
                }
            }
        }
        self.notify(key);

        if let Some(delay) = schedule {
            let manager = Arc::clone(self);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                manager.process_item_boxed(key).await;
            });
        }
    }

    fn process_item_boxed(self: Arc<Self>, key: RetryKey) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            let manager = self;
            manager.process_item(key).await;
        })
    }

    /// Manual retry: resets the retry budget and state, then immediately
    /// attempts a sync. The only way out of `fatal_error`.
    pub async fn retry_item(self: &Arc<Self>, key: RetryKey) {
        {
            let mut items = self.items.write().await;
            let item = items.entry(key).or_insert_with(|| RetryQueueItem::new(key));
            if item.state == RetryState::Syncing {
                return;
            }
            item.retry_count = 0;
            item.state = RetryState::Pending;
            item.error_message = None;
            item.next_retry = None;
        }
        self.notify(key);
        self.process_item(key).await;
    }

    pub async fn get_status(&self, key: RetryKey) -> Option<RetryQueueItem> {
        self.items.read().await.get(&key).cloned()
    }

    /// True while the item still has automatic attempts scheduled.
    pub async fn is_auto_retrying(&self, key: RetryKey) -> bool {
        match self.items.read().await.get(&key) {
            Some(item) => {
                item.state == RetryState::Error && item.retry_count < self.policy.max_auto_retries
            }
            None => false,
        }
    }

    /// True once the item fatally failed or exhausted its retry budget.
    pub async fn needs_manual_retry(&self, key: RetryKey) -> bool {
        match self.items.read().await.get(&key) {
            Some(item) => match item.state {
                RetryState::FatalError => true,
                RetryState::Error => item.retry_count >= self.policy.max_auto_retries,
                _ => false,
            },
            None => false,
        }
    }

    pub async fn snapshot(&self) -> Vec<RetryQueueItem> {
        self.items.read().await.values().cloned().collect()
    }

    /// Key-only change notifications; consumers re-read via `get_status`.
    pub fn subscribe(&self) -> broadcast::Receiver<RetryKey> {
        self.events.subscribe()
    }

    fn notify(&self, key: RetryKey) {
        // Nobody listening is fine; send errors only mean that.
        let _ = self.events.send(key);
    }
}
