#![allow(dead_code)]

pub mod mocks;

use chrono::{TimeZone, Utc};
use fieldsync::application::ports::{
    ConnectivityMonitor, MediaStorage, MirrorStore, MutationPusher, MutationQueue, RemoteBackend,
};
use fieldsync::application::services::{
    MediaUploadCoordinator, QueueService, RetryPolicy, RetryQueueManager, SyncService,
};
use fieldsync::domain::entities::mirror::{Equipment, MirrorSnapshot, Property};
use fieldsync::domain::entities::queue::{
    ChecklistItem, ChecklistPayload, EquipmentConfigurationPayload, MaintenancePayload,
    Observation, PhotoBatchPayload, PAYLOAD_SCHEMA_VERSION,
};
use fieldsync::domain::value_objects::TechnicianId;
use fieldsync::infrastructure::database::{SqliteStore, StoreHandle};
use mocks::{MockMediaStorage, MockRemoteBackend, TestConnectivity};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_TECHNICIAN: &str = "tech-7";

/// Engine wired against in-memory SQLite and the scriptable mocks, with a
/// millisecond retry policy so backoff tests run fast.
pub struct TestHarness {
    pub store: Arc<StoreHandle>,
    pub mirror: Arc<dyn MirrorStore>,
    pub queue: Arc<dyn MutationQueue>,
    pub backend: Arc<MockRemoteBackend>,
    pub media: Arc<MockMediaStorage>,
    pub connectivity: Arc<TestConnectivity>,
    pub sync: Arc<SyncService>,
    pub queue_service: QueueService,
    pub retry: Arc<RetryQueueManager>,
    pub temp: TempDir,
}

pub async fn setup() -> TestHarness {
    let store = Arc::new(StoreHandle::in_memory().await.expect("in-memory sqlite"));
    store.initialize().await.expect("schema");

    let sqlite = Arc::new(SqliteStore::new(Arc::clone(&store)));
    let mirror: Arc<dyn MirrorStore> = sqlite.clone();
    let queue: Arc<dyn MutationQueue> = sqlite;

    let backend = Arc::new(MockRemoteBackend::new());
    let media = Arc::new(MockMediaStorage::new());
    let connectivity = Arc::new(TestConnectivity::new(true));

    let backend_port: Arc<dyn RemoteBackend> = backend.clone();
    let media_port: Arc<dyn MediaStorage> = media.clone();
    let connectivity_port: Arc<dyn ConnectivityMonitor> = connectivity.clone();

    let coordinator = Arc::new(MediaUploadCoordinator::new(media_port));
    let sync = Arc::new(SyncService::new(
        mirror.clone(),
        queue.clone(),
        backend_port,
        coordinator,
        connectivity_port,
    ));

    let pusher: Arc<dyn MutationPusher> = sync.clone();
    let retry = RetryQueueManager::new(
        pusher,
        RetryPolicy {
            max_auto_retries: 3,
            backoff: vec![
                Duration::from_millis(20),
                Duration::from_millis(40),
                Duration::from_millis(60),
            ],
        },
    );

    let queue_service = QueueService::new(queue.clone());

    TestHarness {
        store,
        mirror,
        queue,
        backend,
        media,
        connectivity,
        sync,
        queue_service,
        retry,
        temp: TempDir::new().expect("temp dir"),
    }
}

pub fn technician() -> TechnicianId {
    TechnicianId::new(TEST_TECHNICIAN.to_string()).expect("technician id")
}

/// Writes a blob under the harness temp dir and returns its file:// URI.
pub fn write_photo(temp: &TempDir, name: &str, contents: &[u8]) -> String {
    let path = temp.path().join(name);
    if let Some(parent) = Path::new(&path).parent() {
        std::fs::create_dir_all(parent).expect("media dir");
    }
    std::fs::write(&path, contents).expect("write photo");
    format!("file://{}", path.display())
}

/// Reference snapshot with fixed timestamps so repeated pulls are
/// byte-for-byte comparable.
pub fn reference_snapshot() -> MirrorSnapshot {
    let stamp = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    MirrorSnapshot {
        properties: vec![Property {
            id: "P-1".into(),
            name: "Torre Norte".into(),
            address: Some("Calle Mayor 12".into()),
            city: Some("Madrid".into()),
            last_synced_at: stamp,
        }],
        equipment: vec![
            Equipment {
                id: "EQ-1".into(),
                property_id: "P-1".into(),
                equipment_type_id: Some("ET-1".into()),
                name: "Rooftop panel".into(),
                configured: false,
                detail: None,
                last_synced_at: stamp,
            },
            Equipment {
                id: "EQ-2".into(),
                property_id: "P-1".into(),
                equipment_type_id: Some("ET-1".into()),
                name: "Basement pump".into(),
                configured: true,
                detail: Some(serde_json::json!({"panelType": "exento"})),
                last_synced_at: stamp,
            },
        ],
        equipment_types: vec![],
        instruments: vec![],
        scheduled_work_orders: vec![],
        work_sessions: vec![],
        user_profiles: vec![],
    }
}

pub fn config_payload(equipment_id: &str) -> EquipmentConfigurationPayload {
    EquipmentConfigurationPayload {
        schema_version: PAYLOAD_SCHEMA_VERSION,
        equipment_id: equipment_id.to_string(),
        panel_type: Some("adosado".to_string()),
        detail: serde_json::json!({"panelType": "adosado"}),
    }
}

pub fn maintenance_payload(
    equipment_id: &str,
    work_order_id: Option<&str>,
    photos_pre: Vec<String>,
) -> MaintenancePayload {
    MaintenancePayload {
        schema_version: PAYLOAD_SCHEMA_VERSION,
        work_order_id: work_order_id.map(str::to_string),
        equipment_id: equipment_id.to_string(),
        readings: vec![],
        notes: Some("routine visit".to_string()),
        photos_pre,
        photos_post: vec![],
        observations: vec![],
    }
}

pub fn maintenance_payload_with_observation(
    equipment_id: &str,
    photos_pre: Vec<String>,
    observation_photo: String,
) -> MaintenancePayload {
    let mut payload = maintenance_payload(equipment_id, None, photos_pre);
    payload.observations.push(Observation {
        text: "corrosion on bracket".to_string(),
        photo_uri: Some(observation_photo),
    });
    payload
}

pub fn checklist_payload(equipment_id: &str, photo_uri: Option<String>) -> ChecklistPayload {
    ChecklistPayload {
        schema_version: PAYLOAD_SCHEMA_VERSION,
        work_order_id: Some("WO-5".to_string()),
        equipment_id: equipment_id.to_string(),
        items: vec![ChecklistItem {
            code: "C-01".to_string(),
            passed: true,
            comment: None,
            photo_uri,
        }],
    }
}

pub fn photo_batch_payload(session_id: &str, photo_uris: Vec<String>) -> PhotoBatchPayload {
    PhotoBatchPayload {
        schema_version: PAYLOAD_SCHEMA_VERSION,
        session_id: session_id.to_string(),
        photo_uris,
    }
}
