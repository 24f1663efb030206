use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledWorkOrder {
    pub id: String,
    pub equipment_id: String,
    pub property_id: Option<String>,
    pub status: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub last_synced_at: DateTime<Utc>,
}
