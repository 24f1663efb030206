use super::mappers::{
    equipment_from_row, equipment_type_from_row, instrument_from_row, media_asset_from_row,
    pending_mutation_from_row, property_from_row, scheduled_work_order_from_row,
    user_profile_from_row, work_session_from_row,
};
use super::rows::{
    EquipmentRow, EquipmentTypeRow, InstrumentRow, MediaAssetRow, MutationRow, PropertyRow,
    ScheduledWorkOrderRow, UserProfileRow, WorkSessionRow,
};
use super::store::StoreHandle;
use crate::application::ports::{MirrorStore, MutationQueue};
use crate::domain::entities::mirror::{
    Equipment, EquipmentType, Instrument, MirrorSnapshot, Property, ScheduledWorkOrder,
    UserProfile, WorkSession,
};
use crate::domain::entities::queue::{
    MutationDraft, MutationPayload, PendingMediaAsset, PendingMutation,
};
use crate::domain::value_objects::{
    EquipmentId, MediaAssetId, MutationFamily, MutationId, MutationStatus,
};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqliteConnection;
use std::sync::Arc;

/// SQLite implementation of both store ports, sharing one `StoreHandle`.
pub struct SqliteStore {
    handle: Arc<StoreHandle>,
}

impl SqliteStore {
    pub fn new(handle: Arc<StoreHandle>) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &Arc<StoreHandle> {
        &self.handle
    }
}

fn mutation_table(family: MutationFamily) -> &'static str {
    match family {
        MutationFamily::MaintenanceSubmission => "maintenance_submissions",
        MutationFamily::EquipmentConfiguration => "equipment_configurations",
        MutationFamily::InspectionChecklist => "inspection_checklists",
        MutationFamily::SessionPhotoBatch => "session_photo_batches",
    }
}

fn media_table(family: MutationFamily) -> &'static str {
    match family {
        MutationFamily::MaintenanceSubmission => "maintenance_submission_media",
        MutationFamily::EquipmentConfiguration => "equipment_configuration_media",
        MutationFamily::InspectionChecklist => "inspection_checklist_media",
        MutationFamily::SessionPhotoBatch => "session_photo_batch_media",
    }
}

async fn upsert_optimistic_in(
    conn: &mut SqliteConnection,
    equipment_id: &str,
    detail: &Value,
) -> Result<(), AppError> {
    let detail_json =
        serde_json::to_string(detail).map_err(|err| AppError::SerializationError(err.to_string()))?;
    sqlx::query(
        r#"
        INSERT INTO equipment (id, property_id, name, configured, detail, last_synced_at)
        VALUES (?1, '', '', 1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            configured = 1,
            detail = excluded.detail
        "#,
    )
    .bind(equipment_id)
    .bind(&detail_json)
    .bind(Utc::now().timestamp())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_snapshot(
    conn: &mut SqliteConnection,
    snapshot: &MirrorSnapshot,
) -> Result<(), AppError> {
    for property in &snapshot.properties {
        sqlx::query(
            r#"
            INSERT INTO properties (id, name, address, city, last_synced_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&property.id)
        .bind(&property.name)
        .bind(&property.address)
        .bind(&property.city)
        .bind(property.last_synced_at.timestamp())
        .execute(&mut *conn)
        .await?;
    }

    for equipment in &snapshot.equipment {
        let detail_json = equipment
            .detail
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| AppError::SerializationError(err.to_string()))?;
        sqlx::query(
            r#"
            INSERT INTO equipment
                (id, property_id, equipment_type_id, name, configured, detail, last_synced_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&equipment.id)
        .bind(&equipment.property_id)
        .bind(&equipment.equipment_type_id)
        .bind(&equipment.name)
        .bind(equipment.configured)
        .bind(detail_json)
        .bind(equipment.last_synced_at.timestamp())
        .execute(&mut *conn)
        .await?;
    }

    for equipment_type in &snapshot.equipment_types {
        sqlx::query(
            r#"
            INSERT INTO equipment_types (id, name, category, last_synced_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&equipment_type.id)
        .bind(&equipment_type.name)
        .bind(&equipment_type.category)
        .bind(equipment_type.last_synced_at.timestamp())
        .execute(&mut *conn)
        .await?;
    }

    for instrument in &snapshot.instruments {
        sqlx::query(
            r#"
            INSERT INTO instruments (id, name, unit, last_synced_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&instrument.id)
        .bind(&instrument.name)
        .bind(&instrument.unit)
        .bind(instrument.last_synced_at.timestamp())
        .execute(&mut *conn)
        .await?;
    }

    for order in &snapshot.scheduled_work_orders {
        sqlx::query(
            r#"
            INSERT INTO scheduled_work_orders
                (id, equipment_id, property_id, status, scheduled_for, last_synced_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.id)
        .bind(&order.equipment_id)
        .bind(&order.property_id)
        .bind(&order.status)
        .bind(order.scheduled_for.map(|ts| ts.timestamp()))
        .bind(order.last_synced_at.timestamp())
        .execute(&mut *conn)
        .await?;
    }

    for session in &snapshot.work_sessions {
        sqlx::query(
            r#"
            INSERT INTO work_sessions (id, property_id, technician_id, started_at, last_synced_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&session.id)
        .bind(&session.property_id)
        .bind(&session.technician_id)
        .bind(session.started_at.map(|ts| ts.timestamp()))
        .bind(session.last_synced_at.timestamp())
        .execute(&mut *conn)
        .await?;
    }

    for profile in &snapshot.user_profiles {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (id, display_name, email, role, last_synced_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.display_name)
        .bind(&profile.email)
        .bind(&profile.role)
        .bind(profile.last_synced_at.timestamp())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Equipment ids and detail blobs of configurations that have not reached
/// `synced`. Their optimistic mirror fields must survive a replace.
async fn unsynced_configurations(
    conn: &mut SqliteConnection,
) -> Result<Vec<(String, Value)>, AppError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT payload FROM equipment_configurations WHERE status != 'synced'",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut preserved = Vec::new();
    for (json,) in rows {
        let payload = MutationPayload::from_json(&json)
            .map_err(|err| AppError::DeserializationError(err.to_string()))?;
        if let MutationPayload::EquipmentConfiguration(cfg) = payload {
            preserved.push((cfg.equipment_id, cfg.detail));
        }
    }
    Ok(preserved)
}

#[async_trait]
impl MirrorStore for SqliteStore {
    async fn replace_mirror(&self, snapshot: MirrorSnapshot) -> Result<(), AppError> {
        self.handle
            .with_exclusive_tx(move |conn| {
                Box::pin(async move {
                    let preserved = unsynced_configurations(&mut *conn).await?;

                    for table in [
                        "properties",
                        "equipment",
                        "equipment_types",
                        "instruments",
                        "scheduled_work_orders",
                        "work_sessions",
                        "user_profiles",
                    ] {
                        sqlx::query(&format!("DELETE FROM {table}"))
                            .execute(&mut *conn)
                            .await?;
                    }

                    insert_snapshot(&mut *conn, &snapshot).await?;

                    for (equipment_id, detail) in &preserved {
                        upsert_optimistic_in(&mut *conn, equipment_id, detail).await?;
                    }

                    Ok(())
                })
            })
            .await
    }

    async fn upsert_optimistic(
        &self,
        equipment_id: &EquipmentId,
        detail: &Value,
    ) -> Result<(), AppError> {
        let equipment_id = equipment_id.as_str().to_string();
        let detail = detail.clone();
        self.handle
            .with_exclusive_tx(move |conn| {
                Box::pin(async move { upsert_optimistic_in(&mut *conn, &equipment_id, &detail).await })
            })
            .await
    }

    async fn get_equipment(
        &self,
        equipment_id: &EquipmentId,
    ) -> Result<Option<Equipment>, AppError> {
        let row: Option<EquipmentRow> = sqlx::query_as("SELECT * FROM equipment WHERE id = ?1")
            .bind(equipment_id.as_str())
            .fetch_optional(self.handle.pool())
            .await?;
        row.map(equipment_from_row).transpose()
    }

    async fn list_properties(&self) -> Result<Vec<Property>, AppError> {
        let rows: Vec<PropertyRow> = sqlx::query_as("SELECT * FROM properties ORDER BY name ASC")
            .fetch_all(self.handle.pool())
            .await?;
        Ok(rows.into_iter().map(property_from_row).collect())
    }

    async fn list_equipment_for_property(
        &self,
        property_id: &str,
    ) -> Result<Vec<Equipment>, AppError> {
        let rows: Vec<EquipmentRow> =
            sqlx::query_as("SELECT * FROM equipment WHERE property_id = ?1 ORDER BY name ASC")
                .bind(property_id)
                .fetch_all(self.handle.pool())
                .await?;
        rows.into_iter().map(equipment_from_row).collect()
    }

    async fn list_equipment_types(&self) -> Result<Vec<EquipmentType>, AppError> {
        let rows: Vec<EquipmentTypeRow> =
            sqlx::query_as("SELECT * FROM equipment_types ORDER BY name ASC")
                .fetch_all(self.handle.pool())
                .await?;
        Ok(rows.into_iter().map(equipment_type_from_row).collect())
    }

    async fn list_instruments(&self) -> Result<Vec<Instrument>, AppError> {
        let rows: Vec<InstrumentRow> =
            sqlx::query_as("SELECT * FROM instruments ORDER BY name ASC")
                .fetch_all(self.handle.pool())
                .await?;
        Ok(rows.into_iter().map(instrument_from_row).collect())
    }

    async fn list_scheduled_work_orders(&self) -> Result<Vec<ScheduledWorkOrder>, AppError> {
        let rows: Vec<ScheduledWorkOrderRow> = sqlx::query_as(
            "SELECT * FROM scheduled_work_orders ORDER BY scheduled_for ASC, id ASC",
        )
        .fetch_all(self.handle.pool())
        .await?;
        Ok(rows.into_iter().map(scheduled_work_order_from_row).collect())
    }

    async fn list_work_sessions(&self) -> Result<Vec<WorkSession>, AppError> {
        let rows: Vec<WorkSessionRow> =
            sqlx::query_as("SELECT * FROM work_sessions ORDER BY started_at DESC, id ASC")
                .fetch_all(self.handle.pool())
                .await?;
        Ok(rows.into_iter().map(work_session_from_row).collect())
    }

    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        let rows: Vec<UserProfileRow> =
            sqlx::query_as("SELECT * FROM user_profiles ORDER BY display_name ASC")
                .fetch_all(self.handle.pool())
                .await?;
        Ok(rows.into_iter().map(user_profile_from_row).collect())
    }
}

#[async_trait]
impl MutationQueue for SqliteStore {
    async fn enqueue(&self, draft: MutationDraft) -> Result<MutationId, AppError> {
        let family = draft.family();
        let table = mutation_table(family);
        let media_table = media_table(family);
        let payload_json = draft
            .payload
            .to_json()
            .map_err(|err| AppError::SerializationError(err.to_string()))?;

        self.handle
            .with_exclusive_tx(move |conn| {
                Box::pin(async move {
                    let insert = format!(
                        "INSERT INTO {table} (remote_id, created_by, payload, status, created_at) \
                         VALUES (?1, ?2, ?3, 'pending', ?4)"
                    );
                    let result = sqlx::query(&insert)
                        .bind(&draft.remote_id)
                        .bind(draft.created_by.as_str())
                        .bind(&payload_json)
                        .bind(Utc::now().timestamp())
                        .execute(&mut *conn)
                        .await?;
                    let local_id = result.last_insert_rowid();

                    let insert_media = format!(
                        "INSERT INTO {media_table} (mutation_id, local_uri, category, status) \
                         VALUES (?1, ?2, ?3, 'pending')"
                    );
                    for media in &draft.media {
                        sqlx::query(&insert_media)
                            .bind(local_id)
                            .bind(&media.local_uri)
                            .bind(media.category.as_str())
                            .execute(&mut *conn)
                            .await?;
                    }

                    // The optimistic mirror write rides the same transaction
                    // as the queue insert, so a crash between the two cannot
                    // leave UI state and the durable queue diverged.
                    if let MutationPayload::EquipmentConfiguration(cfg) = &draft.payload {
                        upsert_optimistic_in(&mut *conn, &cfg.equipment_id, &cfg.detail).await?;
                    }

                    MutationId::new(local_id).map_err(AppError::ValidationError)
                })
            })
            .await
    }

    async fn get(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<Option<PendingMutation>, AppError> {
        let table = mutation_table(family);
        let row: Option<MutationRow> =
            sqlx::query_as(&format!("SELECT * FROM {table} WHERE id = ?1"))
                .bind(id.as_i64())
                .fetch_optional(self.handle.pool())
                .await?;
        row.map(|row| pending_mutation_from_row(family, row)).transpose()
    }

    async fn list_pending(&self, family: MutationFamily) -> Result<Vec<PendingMutation>, AppError> {
        let table = mutation_table(family);
        let rows: Vec<MutationRow> = sqlx::query_as(&format!(
            "SELECT * FROM {table} WHERE status IN ('pending', 'error') ORDER BY id ASC"
        ))
        .fetch_all(self.handle.pool())
        .await?;
        rows.into_iter()
            .map(|row| pending_mutation_from_row(family, row))
            .collect()
    }

    async fn set_status(
        &self,
        family: MutationFamily,
        id: MutationId,
        status: MutationStatus,
        error_message: Option<String>,
    ) -> Result<(), AppError> {
        let table = mutation_table(family);
        // A row that reached `synced` never regresses.
        sqlx::query(&format!(
            "UPDATE {table} SET status = ?2, error_message = ?3, \
             synced_at = CASE WHEN ?2 = 'synced' THEN ?4 ELSE synced_at END \
             WHERE id = ?1 AND status != 'synced'"
        ))
        .bind(id.as_i64())
        .bind(status.as_str())
        .bind(&error_message)
        .bind(Utc::now().timestamp())
        .execute(self.handle.pool())
        .await?;
        Ok(())
    }

    async fn mark_synced(
        &self,
        family: MutationFamily,
        id: MutationId,
        payload: &MutationPayload,
        remote_id: Option<String>,
    ) -> Result<(), AppError> {
        let table = mutation_table(family);
        let payload_json = payload
            .to_json()
            .map_err(|err| AppError::SerializationError(err.to_string()))?;
        sqlx::query(&format!(
            "UPDATE {table} SET status = 'synced', error_message = NULL, payload = ?2, \
             remote_id = COALESCE(?3, remote_id), synced_at = ?4 \
             WHERE id = ?1 AND status != 'synced'"
        ))
        .bind(id.as_i64())
        .bind(&payload_json)
        .bind(&remote_id)
        .bind(Utc::now().timestamp())
        .execute(self.handle.pool())
        .await?;
        Ok(())
    }

    async fn list_media(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<Vec<PendingMediaAsset>, AppError> {
        let table = media_table(family);
        let rows: Vec<MediaAssetRow> = sqlx::query_as(&format!(
            "SELECT * FROM {table} WHERE mutation_id = ?1 ORDER BY id ASC"
        ))
        .bind(id.as_i64())
        .fetch_all(self.handle.pool())
        .await?;
        rows.into_iter().map(media_asset_from_row).collect()
    }

    async fn list_unsynced_media(
        &self,
        family: MutationFamily,
        id: MutationId,
    ) -> Result<Vec<PendingMediaAsset>, AppError> {
        let table = media_table(family);
        let rows: Vec<MediaAssetRow> = sqlx::query_as(&format!(
            "SELECT * FROM {table} WHERE mutation_id = ?1 AND status != 'synced' ORDER BY id ASC"
        ))
        .bind(id.as_i64())
        .fetch_all(self.handle.pool())
        .await?;
        rows.into_iter().map(media_asset_from_row).collect()
    }

    async fn mark_media_synced(
        &self,
        family: MutationFamily,
        asset_id: MediaAssetId,
        remote_url: &str,
    ) -> Result<(), AppError> {
        let table = media_table(family);
        sqlx::query(&format!(
            "UPDATE {table} SET status = 'synced', remote_url = ?2 WHERE id = ?1"
        ))
        .bind(asset_id.as_i64())
        .bind(remote_url)
        .execute(self.handle.pool())
        .await?;
        Ok(())
    }

    async fn mark_media_error(
        &self,
        family: MutationFamily,
        asset_id: MediaAssetId,
    ) -> Result<(), AppError> {
        let table = media_table(family);
        sqlx::query(&format!(
            "UPDATE {table} SET status = 'error' WHERE id = ?1 AND status != 'synced'"
        ))
        .bind(asset_id.as_i64())
        .execute(self.handle.pool())
        .await?;
        Ok(())
    }

    async fn pending_count(&self, family: MutationFamily) -> Result<u32, AppError> {
        let table = mutation_table(family);
        let (count,): (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM {table} WHERE status IN ('pending', 'syncing', 'error')"
        ))
        .fetch_one(self.handle.pool())
        .await?;
        u32::try_from(count).map_err(|_| AppError::Internal("pending count overflow".into()))
    }
}
