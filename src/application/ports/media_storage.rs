use crate::shared::error::AppError;
use async_trait::async_trait;

/// Remote object storage. `put_object` returns the durable public URL of
/// the stored blob; any failure propagates so the caller decides retry
/// policy. No local state is mutated here.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}
