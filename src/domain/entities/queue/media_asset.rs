use crate::domain::value_objects::{MediaAssetId, MediaCategory, MediaStatus, MutationId};
use serde::{Deserialize, Serialize};

/// A locally captured blob tied to a pending mutation. Updated in place as
/// uploads complete; `remote_url` is set the moment its upload succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingMediaAsset {
    pub id: MediaAssetId,
    pub mutation_id: MutationId,
    pub local_uri: String,
    pub category: MediaCategory,
    pub status: MediaStatus,
    pub remote_url: Option<String>,
}
