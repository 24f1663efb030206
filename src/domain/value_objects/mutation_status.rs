use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationStatus {
    Pending,
    Syncing,
    Synced,
    Error,
    Unknown(String),
}

impl MutationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MutationStatus::Pending => "pending",
            MutationStatus::Syncing => "syncing",
            MutationStatus::Synced => "synced",
            MutationStatus::Error => "error",
            MutationStatus::Unknown(value) => value.as_str(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationStatus::Synced)
    }
}

impl fmt::Display for MutationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for MutationStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => MutationStatus::Pending,
            "syncing" => MutationStatus::Syncing,
            "synced" => MutationStatus::Synced,
            "error" => MutationStatus::Error,
            other => MutationStatus::Unknown(other.to_string()),
        }
    }
}
