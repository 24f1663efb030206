use crate::domain::value_objects::{MutationFamily, MutationId, RetryState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composite key of a tracked retry item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetryKey {
    pub family: MutationFamily,
    pub id: MutationId,
}

impl RetryKey {
    pub fn new(family: MutationFamily, id: MutationId) -> Self {
        Self { family, id }
    }
}

/// Process-lifetime tracking record for one user-retriable mutation.
/// Not persisted; rebuilt from the durable queue on restart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryQueueItem {
    pub key: RetryKey,
    pub state: RetryState,
    pub retry_count: u32,
    pub last_attempt: Option<DateTime<Utc>>,
    pub next_retry: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl RetryQueueItem {
    pub fn new(key: RetryKey) -> Self {
        Self {
            key,
            state: RetryState::Pending,
            retry_count: 0,
            last_attempt: None,
            next_retry: None,
            error_message: None,
        }
    }
}
