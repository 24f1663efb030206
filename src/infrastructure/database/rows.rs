use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PropertyRow {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub last_synced_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EquipmentRow {
    pub id: String,
    pub property_id: String,
    pub equipment_type_id: Option<String>,
    pub name: String,
    pub configured: bool,
    pub detail: Option<String>,
    pub last_synced_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EquipmentTypeRow {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub last_synced_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InstrumentRow {
    pub id: String,
    pub name: String,
    pub unit: Option<String>,
    pub last_synced_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduledWorkOrderRow {
    pub id: String,
    pub equipment_id: String,
    pub property_id: Option<String>,
    pub status: String,
    pub scheduled_for: Option<i64>,
    pub last_synced_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkSessionRow {
    pub id: String,
    pub property_id: String,
    pub technician_id: Option<String>,
    pub started_at: Option<i64>,
    pub last_synced_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub last_synced_at: i64,
}

/// Shared row shape of the four per-family mutation tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MutationRow {
    pub id: i64,
    pub remote_id: Option<String>,
    pub created_by: String,
    pub payload: String,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: i64,
    pub synced_at: Option<i64>,
}

/// Shared row shape of the four per-family media tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaAssetRow {
    pub id: i64,
    pub mutation_id: i64,
    pub local_uri: String,
    pub category: String,
    pub status: String,
    pub remote_url: Option<String>,
}
