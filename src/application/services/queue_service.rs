use crate::application::ports::MutationQueue;
use crate::domain::entities::queue::{
    ChecklistPayload, EquipmentConfigurationPayload, MaintenancePayload, MediaDraft,
    MutationDraft, MutationPayload, PendingMutation, PhotoBatchPayload,
};
use crate::domain::value_objects::{
    EquipmentId, MediaCategory, MutationFamily, MutationId, TechnicianId, WorkOrderId,
};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Per-family pending badge counts for the excluded status UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PendingCounts {
    pub maintenance_submissions: u32,
    pub equipment_configurations: u32,
    pub inspection_checklists: u32,
    pub session_photo_batches: u32,
}

impl PendingCounts {
    pub fn total(&self) -> u32 {
        self.maintenance_submissions
            + self.equipment_configurations
            + self.inspection_checklists
            + self.session_photo_batches
    }
}

/// The UI-facing append side of the offline write queue. Builds drafts
/// (payload plus the media rows derived from its local URIs) and hands them
/// to the durable queue; never blocks on the network.
pub struct QueueService {
    queue: Arc<dyn MutationQueue>,
}

impl QueueService {
    pub fn new(queue: Arc<dyn MutationQueue>) -> Self {
        Self { queue }
    }

    pub async fn enqueue_maintenance(
        &self,
        created_by: TechnicianId,
        payload: MaintenancePayload,
    ) -> Result<MutationId, AppError> {
        EquipmentId::new(payload.equipment_id.clone()).map_err(AppError::ValidationError)?;
        if let Some(work_order_id) = &payload.work_order_id {
            WorkOrderId::new(work_order_id.clone()).map_err(AppError::ValidationError)?;
        }

        let mut media = Vec::new();
        for uri in &payload.photos_pre {
            media.push(MediaDraft::new(uri.clone(), MediaCategory::Pre));
        }
        for uri in &payload.photos_post {
            media.push(MediaDraft::new(uri.clone(), MediaCategory::Post));
        }
        for observation in &payload.observations {
            if let Some(uri) = &observation.photo_uri {
                media.push(MediaDraft::new(uri.clone(), MediaCategory::Observation));
            }
        }

        let remote_id = payload.work_order_id.clone();
        let mut draft = MutationDraft::new(
            created_by,
            MutationPayload::MaintenanceSubmission(payload),
            media,
        );
        if let Some(remote_id) = remote_id {
            draft = draft.with_remote_id(remote_id);
        }
        let id = self.queue.enqueue(draft).await?;
        info!("Maintenance submission queued: {}", id);
        Ok(id)
    }

    pub async fn enqueue_equipment_configuration(
        &self,
        created_by: TechnicianId,
        payload: EquipmentConfigurationPayload,
    ) -> Result<MutationId, AppError> {
        let equipment_id =
            EquipmentId::new(payload.equipment_id.clone()).map_err(AppError::ValidationError)?;

        let draft = MutationDraft::new(
            created_by,
            MutationPayload::EquipmentConfiguration(payload),
            Vec::new(),
        )
        .with_remote_id(equipment_id.as_str().to_string());
        let id = self.queue.enqueue(draft).await?;
        info!("Equipment configuration queued: {} ({})", id, equipment_id);
        Ok(id)
    }

    pub async fn enqueue_inspection_checklist(
        &self,
        created_by: TechnicianId,
        payload: ChecklistPayload,
    ) -> Result<MutationId, AppError> {
        EquipmentId::new(payload.equipment_id.clone()).map_err(AppError::ValidationError)?;
        if let Some(work_order_id) = &payload.work_order_id {
            WorkOrderId::new(work_order_id.clone()).map_err(AppError::ValidationError)?;
        }

        let media = payload
            .items
            .iter()
            .filter_map(|item| item.photo_uri.clone())
            .map(|uri| MediaDraft::new(uri, MediaCategory::ChecklistItem))
            .collect();

        let remote_id = payload.work_order_id.clone();
        let mut draft = MutationDraft::new(
            created_by,
            MutationPayload::InspectionChecklist(payload),
            media,
        );
        if let Some(remote_id) = remote_id {
            draft = draft.with_remote_id(remote_id);
        }
        let id = self.queue.enqueue(draft).await?;
        info!("Inspection checklist queued: {}", id);
        Ok(id)
    }

    pub async fn enqueue_photo_batch(
        &self,
        created_by: TechnicianId,
        payload: PhotoBatchPayload,
    ) -> Result<MutationId, AppError> {
        if payload.session_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Photo batch session_id cannot be empty".to_string(),
            ));
        }

        let media = payload
            .photo_uris
            .iter()
            .map(|uri| MediaDraft::new(uri.clone(), MediaCategory::Session))
            .collect();

        let remote_id = payload.session_id.clone();
        let draft = MutationDraft::new(
            created_by,
            MutationPayload::SessionPhotoBatch(payload),
            media,
        )
        .with_remote_id(remote_id);
        let id = self.queue.enqueue(draft).await?;
        info!("Session photo batch queued: {}", id);
        Ok(id)
    }

    pub async fn get(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<Option<PendingMutation>, AppError> {
        self.queue.get(family, id).await
    }

    pub async fn pending_counts(&self) -> Result<PendingCounts, AppError> {
        Ok(PendingCounts {
            maintenance_submissions: self
                .queue
                .pending_count(MutationFamily::MaintenanceSubmission)
                .await?,
            equipment_configurations: self
                .queue
                .pending_count(MutationFamily::EquipmentConfiguration)
                .await?,
            inspection_checklists: self
                .queue
                .pending_count(MutationFamily::InspectionChecklist)
                .await?,
            session_photo_batches: self
                .queue
                .pending_count(MutationFamily::SessionPhotoBatch)
                .await?,
        })
    }
}
