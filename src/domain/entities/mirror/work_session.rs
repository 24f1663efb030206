use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A technician's visit to a property; photo batches reference it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkSession {
    pub id: String,
    pub property_id: String,
    pub technician_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub last_synced_at: DateTime<Utc>,
}
