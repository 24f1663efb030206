use crate::domain::value_objects::MutationFamily;
use serde::{Deserialize, Serialize};

/// Outcome of one `push_pending_work` run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PushReport {
    /// True when the push returned immediately because the device was
    /// offline; no item was touched.
    pub skipped_offline: bool,
    pub families: Vec<FamilyPushStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FamilyPushStats {
    pub family: MutationFamily,
    pub attempted: u32,
    pub synced: u32,
    pub failed: u32,
}

impl PushReport {
    pub fn offline() -> Self {
        Self {
            skipped_offline: true,
            families: Vec::new(),
        }
    }

    pub fn total_synced(&self) -> u32 {
        self.families.iter().map(|f| f.synced).sum()
    }

    pub fn total_failed(&self) -> u32 {
        self.families.iter().map(|f| f.failed).sum()
    }
}
