use super::payload::MutationPayload;
use crate::domain::value_objects::{
    MediaCategory, MutationFamily, MutationId, MutationStatus, TechnicianId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One durable, not-yet-applied remote write. Rows are advanced by the sync
/// orchestrator and never deleted; `synced` rows remain as the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingMutation {
    pub local_id: MutationId,
    pub family: MutationFamily,
    pub remote_id: Option<String>,
    pub created_by: TechnicianId,
    pub payload: MutationPayload,
    pub status: MutationStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub synced_at: Option<DateTime<Utc>>,
}

/// Input to `enqueue`: the payload plus the local media references that
/// become PendingMediaAsset rows in the same transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationDraft {
    pub created_by: TechnicianId,
    pub remote_id: Option<String>,
    pub payload: MutationPayload,
    pub media: Vec<MediaDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaDraft {
    pub local_uri: String,
    pub category: MediaCategory,
}

impl MutationDraft {
    pub fn new(created_by: TechnicianId, payload: MutationPayload, media: Vec<MediaDraft>) -> Self {
        Self {
            created_by,
            remote_id: None,
            payload,
            media,
        }
    }

    pub fn with_remote_id(mut self, remote_id: String) -> Self {
        self.remote_id = Some(remote_id);
        self
    }

    pub fn family(&self) -> MutationFamily {
        self.payload.family()
    }
}

impl MediaDraft {
    pub fn new(local_uri: String, category: MediaCategory) -> Self {
        Self {
            local_uri,
            category,
        }
    }
}
