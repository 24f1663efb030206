use crate::domain::entities::queue::{
    MutationDraft, MutationPayload, PendingMediaAsset, PendingMutation,
};
use crate::domain::value_objects::{MediaAssetId, MutationFamily, MutationId, MutationStatus};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable offline write queue, one accessor set shared across the four
/// mutation families. All writes go through the store's exclusive
/// transaction primitive; nothing here touches the network.
#[async_trait]
pub trait MutationQueue: Send + Sync {
    /// Inserts one mutation row and its media rows in a single transaction.
    /// For the EquipmentConfiguration family the optimistic equipment
    /// mirror write joins the same transaction, so UI-visible state and the
    /// durable queue cannot diverge across a crash.
    async fn enqueue(&self, draft: MutationDraft) -> Result<MutationId, AppError>;

    async fn get(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<Option<PendingMutation>, AppError>;

    /// Rows with status in {pending, error}, oldest first. FIFO processing
    /// order keeps sequential submissions for the same equipment applying
    /// in creation order.
    async fn list_pending(&self, family: MutationFamily) -> Result<Vec<PendingMutation>, AppError>;

    async fn set_status(
        &self,
        family: MutationFamily,
        id: MutationId,
        status: MutationStatus,
        error_message: Option<String>,
    ) -> Result<(), AppError>;

    /// Terminal success transition: stores the rewritten payload, the remote
    /// correlation id when one was assigned, stamps `synced_at`.
    async fn mark_synced(
        &self,
        family: MutationFamily,
        id: MutationId,
        payload: &MutationPayload,
        remote_id: Option<String>,
    ) -> Result<(), AppError>;

    async fn list_media(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<Vec<PendingMediaAsset>, AppError>;

    /// Media rows not yet `synced` (pending or error), insertion order.
    async fn list_unsynced_media(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<Vec<PendingMediaAsset>, AppError>;

    async fn mark_media_synced(
        &self,
        family: MutationFamily,
        asset_id: MediaAssetId,
        remote_url: &str,
    ) -> Result<(), AppError>;

    async fn mark_media_error(
        &self,
        family: MutationFamily,
        asset_id: MediaAssetId,
    ) -> Result<(), AppError>;

    async fn pending_count(&self, family: MutationFamily) -> Result<u32, AppError>;
}
