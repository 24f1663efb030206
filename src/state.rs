use crate::application::ports::{
    ConnectivityMonitor, MediaStorage, MirrorStore, MutationPusher, MutationQueue, RemoteBackend,
};
use crate::application::services::{
    MediaUploadCoordinator, QueueService, RetryPolicy, RetryQueueManager, SyncService,
};
use crate::domain::entities::queue::EquipmentConfigurationPayload;
use crate::domain::entities::retry::RetryKey;
use crate::domain::value_objects::{MutationFamily, MutationId, TechnicianId};
use crate::infrastructure::database::{SqliteStore, StoreHandle};
use crate::infrastructure::network::HttpConnectivityProbe;
use crate::infrastructure::remote::{HttpMediaStorage, HttpRemoteBackend};
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Composition root. All engine singletons are constructed here and
/// dependency-injected; nothing is a global static, so tests wire the same
/// services against fake backends and clocks.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<StoreHandle>,
    pub mirror: Arc<dyn MirrorStore>,
    pub queue_service: Arc<QueueService>,
    pub sync_service: Arc<SyncService>,
    pub retry_queue: Arc<RetryQueueManager>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    probe: Arc<HttpConnectivityProbe>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;

        let store = Arc::new(StoreHandle::connect(&config.database.url).await?);
        store.initialize().await?;

        let sqlite = Arc::new(SqliteStore::new(Arc::clone(&store)));
        let mirror: Arc<dyn MirrorStore> = sqlite.clone();
        let queue: Arc<dyn MutationQueue> = sqlite;

        let backend: Arc<dyn RemoteBackend> = Arc::new(HttpRemoteBackend::new(&config.remote)?);
        let storage: Arc<dyn MediaStorage> = Arc::new(HttpMediaStorage::new(&config.remote)?);
        let probe = Arc::new(HttpConnectivityProbe::new(
            &config.remote.base_url,
            config.remote.request_timeout,
        )?);
        let connectivity: Arc<dyn ConnectivityMonitor> = probe.clone();

        let media = Arc::new(MediaUploadCoordinator::new(storage));
        let sync_service = Arc::new(SyncService::new(
            mirror.clone(),
            queue.clone(),
            backend,
            media,
            connectivity.clone(),
        ));
        let pusher: Arc<dyn MutationPusher> = sync_service.clone();
        let retry_queue = RetryQueueManager::new(pusher, RetryPolicy::from_config(&config.sync));
        let queue_service = Arc::new(QueueService::new(queue));

        Ok(Self {
            config,
            store,
            mirror,
            queue_service,
            sync_service,
            retry_queue,
            connectivity,
            probe,
        })
    }

    /// Starts the connectivity probe and the auto-sync loop.
    pub fn start_background_sync(&self) {
        if !self.config.sync.auto_sync {
            return;
        }
        self.probe.spawn_polling(self.config.sync.sync_interval);
        self.sync_service
            .spawn_auto_sync(self.config.sync.sync_interval);
    }

    /// Platform reachability callbacks feed the probe directly; the poll
    /// loop stays as the safety net.
    pub fn report_connectivity(&self, connected: bool) {
        self.probe.set_connected(connected);
    }

    /// Enqueues an equipment configuration and registers it with the retry
    /// queue; when the device is online the first attempt starts
    /// immediately in the background.
    pub async fn submit_equipment_configuration(
        &self,
        created_by: TechnicianId,
        payload: EquipmentConfigurationPayload,
    ) -> Result<MutationId, AppError> {
        let id = self
            .queue_service
            .enqueue_equipment_configuration(created_by, payload)
            .await?;
        let key = RetryKey::new(MutationFamily::EquipmentConfiguration, id);
        self.retry_queue.enqueue(key).await;

        if self.connectivity.is_connected().await {
            let manager = Arc::clone(&self.retry_queue);
            tokio::spawn(async move {
                manager.process_item(key).await;
            });
        }
        Ok(id)
    }
}
