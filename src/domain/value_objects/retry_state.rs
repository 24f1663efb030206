use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an in-memory retry queue item. `FatalError` is
/// terminal for automatic scheduling; only a manual retry leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryState {
    Pending,
    Syncing,
    Synced,
    Error,
    FatalError,
}

impl RetryState {
    pub fn as_str(&self) -> &str {
        match self {
            RetryState::Pending => "pending",
            RetryState::Syncing => "syncing",
            RetryState::Synced => "synced",
            RetryState::Error => "error",
            RetryState::FatalError => "fatal_error",
        }
    }
}

impl fmt::Display for RetryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
