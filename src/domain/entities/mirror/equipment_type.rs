use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquipmentType {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub last_synced_at: DateTime<Utc>,
}
