use async_trait::async_trait;
use fieldsync::application::ports::{ConnectivityMonitor, MediaStorage, RemoteBackend};
use fieldsync::domain::entities::mirror::{
    Equipment, EquipmentType, Instrument, MirrorSnapshot, Property, ScheduledWorkOrder,
    UserProfile, WorkSession,
};
use fieldsync::domain::entities::queue::{
    ChecklistPayload, EquipmentConfigurationPayload, MaintenancePayload, PhotoBatchPayload,
};
use fieldsync::shared::error::AppError;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;

/// How the mock backend rejects write calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Network,
    Forbidden,
    NotFound,
}

impl FailureMode {
    fn to_error(self) -> AppError {
        match self {
            FailureMode::Network => AppError::Network("connection reset by peer".to_string()),
            FailureMode::Forbidden => AppError::Unauthorized("403 Forbidden".to_string()),
            FailureMode::NotFound => AppError::NotFound("404 Not Found".to_string()),
        }
    }
}

/// Scriptable in-memory stand-in for the remote system of record.
pub struct MockRemoteBackend {
    pub snapshot: Mutex<MirrorSnapshot>,
    pub fetch_delay: Mutex<Duration>,
    pub fetch_calls: AtomicU32,
    pub fail_fetches: AtomicBool,
    pub submit_failure: Mutex<Option<FailureMode>>,
    pub maintenance_submissions: Mutex<Vec<MaintenancePayload>>,
    pub equipment_updates: Mutex<Vec<EquipmentConfigurationPayload>>,
    pub checklist_submissions: Mutex<Vec<ChecklistPayload>>,
    pub photo_batches: Mutex<Vec<PhotoBatchPayload>>,
    pub work_order_updates: Mutex<Vec<(String, String)>>,
}

impl MockRemoteBackend {
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(MirrorSnapshot::default()),
            fetch_delay: Mutex::new(Duration::ZERO),
            fetch_calls: AtomicU32::new(0),
            fail_fetches: AtomicBool::new(false),
            submit_failure: Mutex::new(None),
            maintenance_submissions: Mutex::new(Vec::new()),
            equipment_updates: Mutex::new(Vec::new()),
            checklist_submissions: Mutex::new(Vec::new()),
            photo_batches: Mutex::new(Vec::new()),
            work_order_updates: Mutex::new(Vec::new()),
        }
    }

    pub fn set_snapshot(&self, snapshot: MirrorSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock().unwrap() = delay;
    }

    pub fn set_submit_failure(&self, mode: Option<FailureMode>) {
        *self.submit_failure.lock().unwrap() = mode;
    }

    fn check_write(&self) -> Result<(), AppError> {
        if let Some(mode) = *self.submit_failure.lock().unwrap() {
            return Err(mode.to_error());
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), AppError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(AppError::Network("name resolution failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteBackend for MockRemoteBackend {
    async fn fetch_properties(&self) -> Result<Vec<Property>, AppError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.fetch_delay.lock().unwrap();
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
        self.check_read()?;
        Ok(self.snapshot.lock().unwrap().properties.clone())
    }

    async fn fetch_equipment(&self) -> Result<Vec<Equipment>, AppError> {
        self.check_read()?;
        Ok(self.snapshot.lock().unwrap().equipment.clone())
    }

    async fn fetch_equipment_types(&self) -> Result<Vec<EquipmentType>, AppError> {
        self.check_read()?;
        Ok(self.snapshot.lock().unwrap().equipment_types.clone())
    }

    async fn fetch_instruments(&self) -> Result<Vec<Instrument>, AppError> {
        self.check_read()?;
        Ok(self.snapshot.lock().unwrap().instruments.clone())
    }

    async fn fetch_scheduled_work_orders(&self) -> Result<Vec<ScheduledWorkOrder>, AppError> {
        self.check_read()?;
        Ok(self.snapshot.lock().unwrap().scheduled_work_orders.clone())
    }

    async fn fetch_work_sessions(&self) -> Result<Vec<WorkSession>, AppError> {
        self.check_read()?;
        Ok(self.snapshot.lock().unwrap().work_sessions.clone())
    }

    async fn fetch_user_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        self.check_read()?;
        Ok(self.snapshot.lock().unwrap().user_profiles.clone())
    }

    async fn submit_maintenance(&self, payload: &MaintenancePayload) -> Result<String, AppError> {
        self.check_write()?;
        let mut submissions = self.maintenance_submissions.lock().unwrap();
        submissions.push(payload.clone());
        Ok(format!("remote-maint-{}", submissions.len()))
    }

    async fn update_equipment_detail(
        &self,
        payload: &EquipmentConfigurationPayload,
    ) -> Result<(), AppError> {
        self.check_write()?;
        self.equipment_updates.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn update_work_order_status(
        &self,
        work_order_id: &str,
        status: &str,
    ) -> Result<(), AppError> {
        self.check_write()?;
        self.work_order_updates
            .lock()
            .unwrap()
            .push((work_order_id.to_string(), status.to_string()));
        Ok(())
    }

    async fn submit_checklist(&self, payload: &ChecklistPayload) -> Result<(), AppError> {
        self.check_write()?;
        self.checklist_submissions.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn submit_photo_batch(&self, payload: &PhotoBatchPayload) -> Result<(), AppError> {
        self.check_write()?;
        self.photo_batches.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Object-storage stand-in. Blobs whose bytes start with `FAIL` error with
/// a transient network failure; everything else is stored and answered
/// with a deterministic URL.
pub struct MockMediaStorage {
    pub uploads: Mutex<Vec<String>>,
}

impl MockMediaStorage {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStorage for MockMediaStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, AppError> {
        if bytes.starts_with(b"FAIL") {
            return Err(AppError::Network("stream closed mid-upload".to_string()));
        }
        self.uploads.lock().unwrap().push(key.to_string());
        Ok(format!("https://cdn.test/{key}"))
    }
}

/// Manually driven connectivity signal.
pub struct TestConnectivity {
    state: watch::Sender<bool>,
}

impl TestConnectivity {
    pub fn new(connected: bool) -> Self {
        let (state, _) = watch::channel(connected);
        Self { state }
    }

    pub fn set(&self, connected: bool) {
        // send_replace updates the value even with no live receivers.
        self.state.send_replace(connected);
    }
}

#[async_trait]
impl ConnectivityMonitor for TestConnectivity {
    async fn is_connected(&self) -> bool {
        *self.state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}
