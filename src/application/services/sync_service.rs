use super::media_coordinator::{rewrite_payload, MediaUploadCoordinator};
use crate::application::ports::{
    ConnectivityMonitor, MirrorStore, MutationPusher, MutationQueue, RemoteBackend,
};
use crate::domain::entities::mirror::MirrorSnapshot;
use crate::domain::entities::queue::{FamilyPushStats, MutationPayload, PushReport};
use crate::domain::value_objects::{MediaStatus, MutationFamily, MutationId, MutationStatus};
use crate::shared::error::AppError;
use async_trait::async_trait;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

type SharedPull = Shared<BoxFuture<'static, bool>>;

/// Work-order status written after a linked submission lands remotely.
const WORK_ORDER_COMPLETED: &str = "completed";

/// The only component that talks to the remote backend for bulk
/// reconciliation. Pull refreshes the mirror wholesale; push drains the
/// offline write queue family by family, media first.
pub struct SyncService {
    mirror: Arc<dyn MirrorStore>,
    queue: Arc<dyn MutationQueue>,
    backend: Arc<dyn RemoteBackend>,
    media: Arc<MediaUploadCoordinator>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    pull_gate: Arc<Mutex<Option<SharedPull>>>,
    push_gate: Arc<Mutex<()>>,
}

impl SyncService {
    pub fn new(
        mirror: Arc<dyn MirrorStore>,
        queue: Arc<dyn MutationQueue>,
        backend: Arc<dyn RemoteBackend>,
        media: Arc<MediaUploadCoordinator>,
        connectivity: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        Self {
            mirror,
            queue,
            backend,
            media,
            connectivity,
            pull_gate: Arc::new(Mutex::new(None)),
            push_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Refreshes every mirror table from the remote backend. Concurrent
    /// callers share the in-flight pull instead of issuing a second one.
    /// Never errors to the caller: failures are logged and reported as
    /// `false` so the UI can keep showing stale-but-consistent local data.
    pub async fn pull_remote_data(&self) -> bool {
        let shared = {
            let mut gate = self.pull_gate.lock().await;
            if let Some(in_flight) = gate.as_ref() {
                debug!("Pull already in flight; awaiting shared result");
                in_flight.clone()
            } else {
                let service = self.clone();
                let gate_handle = Arc::clone(&self.pull_gate);
                // Spawned so an abandoned caller (timeout) cannot cancel
                // the pull; it may still complete and commit later.
                let task = tokio::spawn(async move {
                    let ok = service.run_pull().await;
                    *gate_handle.lock().await = None;
                    ok
                });
                let shared: SharedPull = task.map(|result| result.unwrap_or(false)).boxed().shared();
                *gate = Some(shared.clone());
                shared
            }
        };
        shared.await
    }

    /// Races the shared pull against a caller timeout. On timeout the wait
    /// is abandoned; the pull itself keeps running to completion.
    pub async fn pull_with_timeout(&self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.pull_remote_data()).await {
            Ok(ok) => ok,
            Err(_) => {
                warn!("Pull timed out after {:?}; continuing in background", timeout);
                false
            }
        }
    }

    async fn run_pull(&self) -> bool {
        let snapshot = match self.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("Pull failed: {}", err);
                return false;
            }
        };
        let count = snapshot.record_count();
        match self.mirror.replace_mirror(snapshot).await {
            Ok(()) => {
                info!("Pull completed: {} mirror records", count);
                true
            }
            Err(err) => {
                error!("Mirror replace failed: {}", err);
                false
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<MirrorSnapshot, AppError> {
        // Independent read queries; fetched concurrently.
        let (
            properties,
            equipment,
            equipment_types,
            instruments,
            scheduled_work_orders,
            work_sessions,
            user_profiles,
        ) = tokio::try_join!(
            self.backend.fetch_properties(),
            self.backend.fetch_equipment(),
            self.backend.fetch_equipment_types(),
            self.backend.fetch_instruments(),
            self.backend.fetch_scheduled_work_orders(),
            self.backend.fetch_work_sessions(),
            self.backend.fetch_user_profiles(),
        )?;

        Ok(MirrorSnapshot {
            properties,
            equipment,
            equipment_types,
            instruments,
            scheduled_work_orders,
            work_sessions,
            user_profiles,
        })
    }

    /// Drains the queue family by family, one item at a time in creation
    /// order. One item's failure never blocks its siblings; families are
    /// processed sequentially to bound peak resource usage on constrained
    /// devices.
    pub async fn push_pending_work(&self) -> Result<PushReport, AppError> {
        let _guard = self.push_gate.lock().await;

        if !self.connectivity.is_connected().await {
            debug!("Push skipped: device is offline");
            return Ok(PushReport::offline());
        }

        let mut report = PushReport::default();
        for family in MutationFamily::PUSH_ORDER {
            let pending = self.queue.list_pending(family).await?;
            let mut stats = FamilyPushStats {
                family,
                attempted: 0,
                synced: 0,
                failed: 0,
            };
            for mutation in pending {
                stats.attempted += 1;
                match self.process_item(family, mutation.local_id).await {
                    Ok(()) => stats.synced += 1,
                    Err(err) => {
                        // Recorded on the row by process_item; keep going.
                        warn!("Push of {} {} failed: {}", family, mutation.local_id, err);
                        stats.failed += 1;
                    }
                }
            }
            report.families.push(stats);
        }

        info!(
            "Push finished: {} synced, {} failed",
            report.total_synced(),
            report.total_failed()
        );
        Ok(report)
    }

    /// Steps 1-5 for one item: mark syncing, upload still-pending media
    /// (first failure aborts the item), rewrite the payload, submit it,
    /// update the linked work order, mark synced. Any failure is written to
    /// the row as its error message before the error is returned.
    async fn process_item(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<(), AppError> {
        let mutation = self
            .queue
            .get(family, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No {family} mutation with id {id}")))?;
        if mutation.status == MutationStatus::Synced {
            return Ok(());
        }

        self.queue
            .set_status(family, id, MutationStatus::Syncing, None)
            .await?;

        // URLs of assets that made it in an earlier attempt feed the
        // rewrite map; only the not-yet-synced remainder is uploaded.
        let mut uri_map: HashMap<String, String> = HashMap::new();
        for asset in self.queue.list_media(family, id).await? {
            if let (MediaStatus::Synced, Some(url)) = (&asset.status, asset.remote_url.clone()) {
                uri_map.insert(asset.local_uri, url);
            }
        }

        for asset in &self.queue.list_unsynced_media(family, id).await? {
            match self.media.upload(&asset.local_uri, &asset.category).await {
                Ok(url) => {
                    self.queue.mark_media_synced(family, asset.id, &url).await?;
                    uri_map.insert(asset.local_uri.clone(), url);
                }
                Err(err) => {
                    // Abort the remaining steps for this item: assets after
                    // this one stay pending and the payload is never
                    // submitted. The next attempt retries from media upload.
                    self.queue.mark_media_error(family, asset.id).await?;
                    self.queue
                        .set_status(family, id, MutationStatus::Error, Some(err.to_string()))
                        .await?;
                    return Err(err);
                }
            }
        }

        let rewritten = rewrite_payload(mutation.payload, &uri_map);

        match self.submit(&rewritten).await {
            Ok(remote_id) => {
                self.queue.mark_synced(family, id, &rewritten, remote_id).await?;
                info!("Synced {} {}", family, id);
                Ok(())
            }
            Err(err) => {
                self.queue
                    .set_status(family, id, MutationStatus::Error, Some(err.to_string()))
                    .await?;
                Err(err)
            }
        }
    }

    /// One remote write per item, plus the linked work-order status update
    /// for the families that carry one. Returns the remote correlation id
    /// when the backend assigns one.
    async fn submit(&self, payload: &MutationPayload) -> Result<Option<String>, AppError> {
        match payload {
            MutationPayload::MaintenanceSubmission(p) => {
                let remote_id = self.backend.submit_maintenance(p).await?;
                if let Some(work_order_id) = p.work_order_id.as_deref() {
                    self.backend
                        .update_work_order_status(work_order_id, WORK_ORDER_COMPLETED)
                        .await?;
                }
                Ok(Some(remote_id))
            }
            MutationPayload::EquipmentConfiguration(p) => {
                self.backend.update_equipment_detail(p).await?;
                Ok(None)
            }
            MutationPayload::InspectionChecklist(p) => {
                self.backend.submit_checklist(p).await?;
                if let Some(work_order_id) = p.work_order_id.as_deref() {
                    self.backend
                        .update_work_order_status(work_order_id, WORK_ORDER_COMPLETED)
                        .await?;
                }
                Ok(None)
            }
            MutationPayload::SessionPhotoBatch(p) => {
                self.backend.submit_photo_batch(p).await?;
                Ok(None)
            }
        }
    }

    /// Background loop: reacts to disconnected→connected transitions and
    /// polls on a fixed interval as a safety net against missed events.
    pub fn spawn_auto_sync(self: &Arc<Self>, interval_secs: u64) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut connectivity = service.connectivity.subscribe();
            let mut interval =
                tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
            let mut was_connected = *connectivity.borrow();

            loop {
                tokio::select! {
                    changed = connectivity.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let connected = *connectivity.borrow_and_update();
                        if connected && !was_connected {
                            info!("Connectivity restored; starting sync cycle");
                            service.sync_cycle().await;
                        }
                        was_connected = connected;
                    }
                    _ = interval.tick() => {
                        if service.connectivity.is_connected().await {
                            service.sync_cycle().await;
                        }
                    }
                }
            }
        })
    }

    async fn sync_cycle(&self) {
        let pulled = self.pull_remote_data().await;
        if !pulled {
            debug!("Sync cycle: pull reported failure");
        }
        if let Err(err) = self.push_pending_work().await {
            error!("Push failed: {}", err);
        }
    }
}

#[async_trait]
impl MutationPusher for SyncService {
    async fn push_one(&self, family: MutationFamily, id: MutationId) -> Result<(), AppError> {
        if !self.connectivity.is_connected().await {
            return Err(AppError::Network("Device is offline".to_string()));
        }
        self.process_item(family, id).await
    }
}

impl Clone for SyncService {
    fn clone(&self) -> Self {
        Self {
            mirror: self.mirror.clone(),
            queue: self.queue.clone(),
            backend: self.backend.clone(),
            media: self.media.clone(),
            connectivity: self.connectivity.clone(),
            pull_gate: self.pull_gate.clone(),
            push_gate: self.push_gate.clone(),
        }
    }
}
