use serde::{Deserialize, Serialize};
use std::fmt;

/// One business category of pending mutation. Each family has its own queue
/// table and payload shape, and families are pushed strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationFamily {
    MaintenanceSubmission,
    EquipmentConfiguration,
    InspectionChecklist,
    SessionPhotoBatch,
}

impl MutationFamily {
    /// Push processing order: maintenance first, photo batches last.
    pub const PUSH_ORDER: [MutationFamily; 4] = [
        MutationFamily::MaintenanceSubmission,
        MutationFamily::EquipmentConfiguration,
        MutationFamily::InspectionChecklist,
        MutationFamily::SessionPhotoBatch,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MutationFamily::MaintenanceSubmission => "maintenance_submission",
            MutationFamily::EquipmentConfiguration => "equipment_configuration",
            MutationFamily::InspectionChecklist => "inspection_checklist",
            MutationFamily::SessionPhotoBatch => "session_photo_batch",
        }
    }
}

impl fmt::Display for MutationFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for MutationFamily {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "maintenance_submission" => Ok(MutationFamily::MaintenanceSubmission),
            "equipment_configuration" => Ok(MutationFamily::EquipmentConfiguration),
            "inspection_checklist" => Ok(MutationFamily::InspectionChecklist),
            "session_photo_batch" => Ok(MutationFamily::SessionPhotoBatch),
            other => Err(format!("Unknown mutation family: {other}")),
        }
    }
}
