use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Local replica of a remote property (building/site) row. Replaced
/// wholesale on every pull; never the source of truth for writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub last_synced_at: DateTime<Utc>,
}
