use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Local replica of a remote equipment row plus the optimistic fields the
/// offline write queue maintains (`configured`, `detail`). Those two fields
/// survive a mirror replace while an equipment-configuration mutation for
/// this id is still unsynced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub id: String,
    pub property_id: String,
    pub equipment_type_id: Option<String>,
    pub name: String,
    pub configured: bool,
    /// Denormalized configuration blob; shape is owned by the remote system.
    pub detail: Option<Value>,
    pub last_synced_at: DateTime<Utc>,
}
