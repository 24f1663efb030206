pub mod media_coordinator;
pub mod queue_service;
pub mod retry_queue;
pub mod sync_service;

pub use media_coordinator::{rewrite_payload, MediaUploadCoordinator};
pub use queue_service::{PendingCounts, QueueService};
pub use retry_queue::{RetryPolicy, RetryQueueManager, MAX_AUTO_RETRIES};
pub use sync_service::SyncService;
