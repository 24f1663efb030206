use crate::domain::entities::mirror::{
    Equipment, EquipmentType, Instrument, Property, ScheduledWorkOrder, UserProfile, WorkSession,
};
use crate::domain::entities::queue::{
    ChecklistPayload, EquipmentConfigurationPayload, MaintenancePayload, PhotoBatchPayload,
};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// The remote system of record. Read endpoints feed the pull; write
/// endpoints receive rewritten payloads during push. Implementations map
/// client-side rejections onto the fatal error variants so the retry
/// scheduler can classify them.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    async fn fetch_properties(&self) -> Result<Vec<Property>, AppError>;
    async fn fetch_equipment(&self) -> Result<Vec<Equipment>, AppError>;
    async fn fetch_equipment_types(&self) -> Result<Vec<EquipmentType>, AppError>;
    async fn fetch_instruments(&self) -> Result<Vec<Instrument>, AppError>;
    async fn fetch_scheduled_work_orders(&self) -> Result<Vec<ScheduledWorkOrder>, AppError>;
    async fn fetch_work_sessions(&self) -> Result<Vec<WorkSession>, AppError>;
    async fn fetch_user_profiles(&self) -> Result<Vec<UserProfile>, AppError>;

    /// Returns the remote id assigned to the submitted response.
    async fn submit_maintenance(&self, payload: &MaintenancePayload) -> Result<String, AppError>;
    async fn update_equipment_detail(
        &self,
        payload: &EquipmentConfigurationPayload,
    ) -> Result<(), AppError>;
    async fn update_work_order_status(
        &self,
        work_order_id: &str,
        status: &str,
    ) -> Result<(), AppError>;
    async fn submit_checklist(&self, payload: &ChecklistPayload) -> Result<(), AppError>;
    async fn submit_photo_batch(&self, payload: &PhotoBatchPayload) -> Result<(), AppError>;
}
