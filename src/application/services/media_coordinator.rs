use crate::application::ports::MediaStorage;
use crate::domain::entities::queue::MutationPayload;
use crate::domain::value_objects::MediaCategory;
use crate::shared::error::AppError;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Uploads locally captured blobs to remote object storage and rewrites
/// mutation payloads to reference the resulting durable URLs. Network I/O
/// only; never mutates local storage. Retry policy belongs to the caller.
pub struct MediaUploadCoordinator {
    storage: Arc<dyn MediaStorage>,
}

impl MediaUploadCoordinator {
    pub fn new(storage: Arc<dyn MediaStorage>) -> Self {
        Self { storage }
    }

    /// Reads the local blob and stores it under a deterministic
    /// category-scoped key with a collision-resistant generated filename.
    pub async fn upload(
        &self,
        local_uri: &str,
        category: &MediaCategory,
    ) -> Result<String, AppError> {
        let path = local_path(local_uri);
        let bytes = tokio::fs::read(path).await?;
        let key = object_key(category, path);
        debug!("Uploading {} as {}", local_uri, key);
        self.storage
            .put_object(&key, bytes, content_type_for(path))
            .await
    }
}

/// Replaces every local-URI occurrence in the payload with its mapped
/// remote URL. Fields with no matching entry are left untouched, so a
/// partial map never corrupts the payload. Pure; must run before the
/// payload is persisted to the remote system.
pub fn rewrite_payload(
    payload: MutationPayload,
    uri_map: &HashMap<String, String>,
) -> MutationPayload {
    match payload {
        MutationPayload::MaintenanceSubmission(mut p) => {
            for uri in p.photos_pre.iter_mut().chain(p.photos_post.iter_mut()) {
                rewrite_uri(uri, uri_map);
            }
            for observation in &mut p.observations {
                if let Some(uri) = observation.photo_uri.as_mut() {
                    rewrite_uri(uri, uri_map);
                }
            }
            MutationPayload::MaintenanceSubmission(p)
        }
        MutationPayload::EquipmentConfiguration(mut p) => {
            rewrite_value(&mut p.detail, uri_map);
            MutationPayload::EquipmentConfiguration(p)
        }
        MutationPayload::InspectionChecklist(mut p) => {
            for item in &mut p.items {
                if let Some(uri) = item.photo_uri.as_mut() {
                    rewrite_uri(uri, uri_map);
                }
            }
            MutationPayload::InspectionChecklist(p)
        }
        MutationPayload::SessionPhotoBatch(mut p) => {
            for uri in &mut p.photo_uris {
                rewrite_uri(uri, uri_map);
            }
            MutationPayload::SessionPhotoBatch(p)
        }
    }
}

fn rewrite_uri(uri: &mut String, uri_map: &HashMap<String, String>) {
    if let Some(remote) = uri_map.get(uri.as_str()) {
        *uri = remote.clone();
    }
}

fn rewrite_value(value: &mut Value, uri_map: &HashMap<String, String>) {
    match value {
        Value::String(text) => {
            if let Some(remote) = uri_map.get(text.as_str()) {
                *text = remote.clone();
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_value(item, uri_map);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                rewrite_value(item, uri_map);
            }
        }
        _ => {}
    }
}

fn local_path(local_uri: &str) -> &str {
    local_uri.strip_prefix("file://").unwrap_or(local_uri)
}

fn object_key(category: &MediaCategory, path: &str) -> String {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    format!("{}/{}.{}", category.as_str(), Uuid::new_v4(), extension)
}

fn content_type_for(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
