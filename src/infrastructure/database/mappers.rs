use super::rows::{
    EquipmentRow, EquipmentTypeRow, InstrumentRow, MediaAssetRow, MutationRow, PropertyRow,
    ScheduledWorkOrderRow, UserProfileRow, WorkSessionRow,
};
use crate::domain::entities::mirror::{
    Equipment, EquipmentType, Instrument, Property, ScheduledWorkOrder, UserProfile, WorkSession,
};
use crate::domain::entities::queue::{MutationPayload, PendingMediaAsset, PendingMutation};
use crate::domain::value_objects::{
    MediaAssetId, MediaCategory, MediaStatus, MutationFamily, MutationId, MutationStatus,
    TechnicianId,
};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};

pub fn property_from_row(row: PropertyRow) -> Property {
    Property {
        id: row.id,
        name: row.name,
        address: row.address,
        city: row.city,
        last_synced_at: timestamp_to_datetime(row.last_synced_at),
    }
}

pub fn equipment_from_row(row: EquipmentRow) -> Result<Equipment, AppError> {
    let detail = row
        .detail
        .map(|json| {
            serde_json::from_str(&json)
                .map_err(|err| AppError::DeserializationError(err.to_string()))
        })
        .transpose()?;
    Ok(Equipment {
        id: row.id,
        property_id: row.property_id,
        equipment_type_id: row.equipment_type_id,
        name: row.name,
        configured: row.configured,
        detail,
        last_synced_at: timestamp_to_datetime(row.last_synced_at),
    })
}

pub fn equipment_type_from_row(row: EquipmentTypeRow) -> EquipmentType {
    EquipmentType {
        id: row.id,
        name: row.name,
        category: row.category,
        last_synced_at: timestamp_to_datetime(row.last_synced_at),
    }
}

pub fn instrument_from_row(row: InstrumentRow) -> Instrument {
    Instrument {
        id: row.id,
        name: row.name,
        unit: row.unit,
        last_synced_at: timestamp_to_datetime(row.last_synced_at),
    }
}

pub fn scheduled_work_order_from_row(row: ScheduledWorkOrderRow) -> ScheduledWorkOrder {
    ScheduledWorkOrder {
        id: row.id,
        equipment_id: row.equipment_id,
        property_id: row.property_id,
        status: row.status,
        scheduled_for: row.scheduled_for.map(timestamp_to_datetime),
        last_synced_at: timestamp_to_datetime(row.last_synced_at),
    }
}

pub fn work_session_from_row(row: WorkSessionRow) -> WorkSession {
    WorkSession {
        id: row.id,
        property_id: row.property_id,
        technician_id: row.technician_id,
        started_at: row.started_at.map(timestamp_to_datetime),
        last_synced_at: timestamp_to_datetime(row.last_synced_at),
    }
}

pub fn user_profile_from_row(row: UserProfileRow) -> UserProfile {
    UserProfile {
        id: row.id,
        display_name: row.display_name,
        email: row.email,
        role: row.role,
        last_synced_at: timestamp_to_datetime(row.last_synced_at),
    }
}

pub fn pending_mutation_from_row(
    family: MutationFamily,
    row: MutationRow,
) -> Result<PendingMutation, AppError> {
    let payload = MutationPayload::from_json(&row.payload)
        .map_err(|err| AppError::DeserializationError(err.to_string()))?;
    let local_id = MutationId::new(row.id).map_err(AppError::ValidationError)?;
    let created_by = TechnicianId::new(row.created_by).map_err(AppError::ValidationError)?;

    Ok(PendingMutation {
        local_id,
        family,
        remote_id: row.remote_id,
        created_by,
        payload,
        status: MutationStatus::from(row.status.as_str()),
        error_message: row.error_message,
        created_at: timestamp_to_datetime(row.created_at),
        synced_at: row.synced_at.map(timestamp_to_datetime),
    })
}

pub fn media_asset_from_row(row: MediaAssetRow) -> Result<PendingMediaAsset, AppError> {
    let id = MediaAssetId::new(row.id).map_err(AppError::ValidationError)?;
    let mutation_id = MutationId::new(row.mutation_id).map_err(AppError::ValidationError)?;

    Ok(PendingMediaAsset {
        id,
        mutation_id,
        local_uri: row.local_uri,
        category: MediaCategory::from(row.category.as_str()),
        status: MediaStatus::from(row.status.as_str()),
        remote_url: row.remote_url,
    })
}

pub fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .or_else(|| DateTime::<Utc>::from_timestamp_millis(ts))
        .unwrap_or_else(Utc::now)
}
