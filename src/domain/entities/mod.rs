pub mod mirror;
pub mod queue;
pub mod retry;

pub use mirror::{
    Equipment, EquipmentType, Instrument, MirrorSnapshot, Property, ScheduledWorkOrder,
    UserProfile, WorkSession,
};
pub use queue::{
    MediaDraft, MutationDraft, MutationPayload, PendingMediaAsset, PendingMutation, PushReport,
};
pub use retry::{RetryKey, RetryQueueItem};
