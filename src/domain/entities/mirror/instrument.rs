use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Measuring instrument referenced by maintenance readings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub unit: Option<String>,
    pub last_synced_at: DateTime<Utc>,
}
