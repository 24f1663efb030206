use serde::{Deserialize, Serialize};
use std::fmt;

/// Family-specific category tag of a pending media asset. The category is
/// part of the remote object key, so the set is closed per family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaCategory {
    Pre,
    Post,
    Observation,
    ChecklistItem,
    Session,
    Unknown(String),
}

impl MediaCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MediaCategory::Pre => "pre",
            MediaCategory::Post => "post",
            MediaCategory::Observation => "observation",
            MediaCategory::ChecklistItem => "checklist-item",
            MediaCategory::Session => "session",
            MediaCategory::Unknown(value) => value.as_str(),
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for MediaCategory {
    fn from(value: &str) -> Self {
        match value {
            "pre" => MediaCategory::Pre,
            "post" => MediaCategory::Post,
            "observation" => MediaCategory::Observation,
            "checklist-item" => MediaCategory::ChecklistItem,
            "session" => MediaCategory::Session,
            other => MediaCategory::Unknown(other.to_string()),
        }
    }
}
