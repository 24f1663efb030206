use crate::domain::value_objects::MutationFamily;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload schema version stamped into every newly enqueued mutation.
/// Older queued rows keep the version they were written with.
pub const PAYLOAD_SCHEMA_VERSION: u32 = 1;

/// Tagged union of the per-family payload shapes. Photo fields hold local
/// URIs until the media coordinator rewrites them to remote URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum MutationPayload {
    MaintenanceSubmission(MaintenancePayload),
    EquipmentConfiguration(EquipmentConfigurationPayload),
    InspectionChecklist(ChecklistPayload),
    SessionPhotoBatch(PhotoBatchPayload),
}

impl MutationPayload {
    pub fn family(&self) -> MutationFamily {
        match self {
            MutationPayload::MaintenanceSubmission(_) => MutationFamily::MaintenanceSubmission,
            MutationPayload::EquipmentConfiguration(_) => MutationFamily::EquipmentConfiguration,
            MutationPayload::InspectionChecklist(_) => MutationFamily::InspectionChecklist,
            MutationPayload::SessionPhotoBatch(_) => MutationFamily::SessionPhotoBatch,
        }
    }

    /// Remote work order linked to this mutation, if the family carries one.
    pub fn work_order_id(&self) -> Option<&str> {
        match self {
            MutationPayload::MaintenanceSubmission(p) => p.work_order_id.as_deref(),
            MutationPayload::InspectionChecklist(p) => p.work_order_id.as_deref(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenancePayload {
    pub schema_version: u32,
    pub work_order_id: Option<String>,
    pub equipment_id: String,
    pub readings: Vec<InstrumentReading>,
    pub notes: Option<String>,
    pub photos_pre: Vec<String>,
    pub photos_post: Vec<String>,
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstrumentReading {
    pub instrument_id: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub text: String,
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquipmentConfigurationPayload {
    pub schema_version: u32,
    pub equipment_id: String,
    pub panel_type: Option<String>,
    /// Denormalized detail blob mirrored optimistically into the local
    /// equipment row at enqueue time.
    pub detail: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistPayload {
    pub schema_version: u32,
    pub work_order_id: Option<String>,
    pub equipment_id: String,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub code: String,
    pub passed: bool,
    pub comment: Option<String>,
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoBatchPayload {
    pub schema_version: u32,
    pub session_id: String,
    pub photo_uris: Vec<String>,
}
