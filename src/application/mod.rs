pub mod ports;
pub mod services;

pub use services::{
    MediaUploadCoordinator, PendingCounts, QueueService, RetryPolicy, RetryQueueManager,
    SyncService,
};
