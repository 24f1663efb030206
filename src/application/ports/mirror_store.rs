use crate::domain::entities::mirror::{
    Equipment, EquipmentType, Instrument, MirrorSnapshot, Property, ScheduledWorkOrder,
    UserProfile, WorkSession,
};
use crate::domain::value_objects::EquipmentId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Read-side replica of remote reference data plus the optimistic equipment
/// fields the write queue maintains. Storage errors propagate to the caller;
/// retry policy lives with the sync orchestrator.
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Wholesale delete+insert of every mirror table in one exclusive
    /// transaction. Optimistic fields of equipment with a not-yet-synced
    /// configuration mutation survive the replace.
    async fn replace_mirror(&self, snapshot: MirrorSnapshot) -> Result<(), AppError>;

    /// Flips the configured flag and stores the detail blob for one
    /// equipment row. The queue implementation performs the same write
    /// inside the enqueue transaction; this standalone form exists for the
    /// mirror re-apply during `replace_mirror` and for tests.
    async fn upsert_optimistic(
        &self,
        equipment_id: &EquipmentId,
        detail: &Value,
    ) -> Result<(), AppError>;

    async fn get_equipment(&self, equipment_id: &EquipmentId) -> Result<Option<Equipment>, AppError>;
    async fn list_properties(&self) -> Result<Vec<Property>, AppError>;
    async fn list_equipment_for_property(
        &self,
        property_id: &str,
    ) -> Result<Vec<Equipment>, AppError>;
    async fn list_equipment_types(&self) -> Result<Vec<EquipmentType>, AppError>;
    async fn list_instruments(&self) -> Result<Vec<Instrument>, AppError>;
    async fn list_scheduled_work_orders(&self) -> Result<Vec<ScheduledWorkOrder>, AppError>;
    async fn list_work_sessions(&self) -> Result<Vec<WorkSession>, AppError>;
    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, AppError>;
}
