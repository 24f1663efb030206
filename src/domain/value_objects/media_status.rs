use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaStatus {
    Pending,
    Synced,
    Error,
    Unknown(String),
}

impl MediaStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MediaStatus::Pending => "pending",
            MediaStatus::Synced => "synced",
            MediaStatus::Error => "error",
            MediaStatus::Unknown(value) => value.as_str(),
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for MediaStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => MediaStatus::Pending,
            "synced" => MediaStatus::Synced,
            "error" => MediaStatus::Error,
            other => MediaStatus::Unknown(other.to_string()),
        }
    }
}
