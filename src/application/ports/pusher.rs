use crate::domain::value_objects::{MutationFamily, MutationId};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// The per-item push primitive. The sync orchestrator implements it; the
/// retry queue manager drives individual items through it so both paths
/// share one state machine.
#[async_trait]
pub trait MutationPusher: Send + Sync {
    async fn push_one(&self, family: MutationFamily, id: MutationId) -> Result<(), AppError>;
}
