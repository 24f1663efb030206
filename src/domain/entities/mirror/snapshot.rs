use super::{
    Equipment, EquipmentType, Instrument, Property, ScheduledWorkOrder, UserProfile, WorkSession,
};
use serde::{Deserialize, Serialize};

/// The full reference-data snapshot produced by one pull. Applied to the
/// local mirror store as a single wholesale replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MirrorSnapshot {
    pub properties: Vec<Property>,
    pub equipment: Vec<Equipment>,
    pub equipment_types: Vec<EquipmentType>,
    pub instruments: Vec<Instrument>,
    pub scheduled_work_orders: Vec<ScheduledWorkOrder>,
    pub work_sessions: Vec<WorkSession>,
    pub user_profiles: Vec<UserProfile>,
}

impl MirrorSnapshot {
    pub fn record_count(&self) -> usize {
        self.properties.len()
            + self.equipment.len()
            + self.equipment_types.len()
            + self.instruments.len()
            + self.scheduled_work_orders.len()
            + self.work_sessions.len()
            + self.user_profiles.len()
    }
}
