pub mod media_asset;
pub mod payload;
pub mod pending_mutation;
pub mod push_report;

pub use media_asset::PendingMediaAsset;
pub use payload::{
    ChecklistItem, ChecklistPayload, EquipmentConfigurationPayload, InstrumentReading,
    MaintenancePayload, MutationPayload, Observation, PhotoBatchPayload, PAYLOAD_SCHEMA_VERSION,
};
pub use pending_mutation::{MediaDraft, MutationDraft, PendingMutation};
pub use push_report::{FamilyPushStats, PushReport};
