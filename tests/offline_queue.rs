mod common;

use common::mocks::FailureMode;
use common::{
    config_payload, maintenance_payload_with_observation, reference_snapshot, setup, technician,
    write_photo,
};
use fieldsync::domain::value_objects::{
    EquipmentId, MediaCategory, MediaStatus, MutationFamily, MutationStatus,
};

#[tokio::test]
async fn enqueue_configuration_updates_mirror_optimistically_while_offline() {
    let harness = setup().await;
    harness.backend.set_snapshot(reference_snapshot());
    assert!(harness.sync.pull_remote_data().await);

    harness.connectivity.set(false);

    let id = harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-1"))
        .await
        .unwrap();

    // Mirror shows the configuration immediately, before any sync.
    let equipment = harness
        .mirror
        .get_equipment(&EquipmentId::new("EQ-1".into()).unwrap())
        .await
        .unwrap()
        .expect("equipment mirrored");
    assert!(equipment.configured);
    assert_eq!(
        equipment.detail.as_ref().and_then(|d| d["panelType"].as_str()),
        Some("adosado")
    );

    let mutation = harness
        .queue
        .get(MutationFamily::EquipmentConfiguration, id)
        .await
        .unwrap()
        .expect("queued row");
    assert_eq!(mutation.status, MutationStatus::Pending);
    assert!(mutation.synced_at.is_none());
    assert_eq!(mutation.created_by.as_str(), common::TEST_TECHNICIAN);

    let counts = harness.queue_service.pending_counts().await.unwrap();
    assert_eq!(counts.equipment_configurations, 1);
    assert_eq!(counts.total(), 1);
}

#[tokio::test]
async fn enqueue_maintenance_creates_one_media_row_per_photo() {
    let harness = setup().await;
    let pre_a = write_photo(&harness.temp, "a.jpg", b"photo-a");
    let pre_b = write_photo(&harness.temp, "b.jpg", b"photo-b");
    let obs = write_photo(&harness.temp, "c.jpg", b"photo-c");

    let payload =
        maintenance_payload_with_observation("EQ-1", vec![pre_a.clone(), pre_b.clone()], obs.clone());
    let id = harness
        .queue_service
        .enqueue_maintenance(technician(), payload)
        .await
        .unwrap();

    let assets = harness
        .queue
        .list_media(MutationFamily::MaintenanceSubmission, id)
        .await
        .unwrap();
    assert_eq!(assets.len(), 3);
    assert!(assets.iter().all(|a| a.status == MediaStatus::Pending));
    assert!(assets.iter().all(|a| a.remote_url.is_none()));
    assert_eq!(assets[0].category, MediaCategory::Pre);
    assert_eq!(assets[1].category, MediaCategory::Pre);
    assert_eq!(assets[2].category, MediaCategory::Observation);
    assert_eq!(assets[2].local_uri, obs);
}

#[tokio::test]
async fn list_pending_returns_oldest_first() {
    let harness = setup().await;

    let first = harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-1"))
        .await
        .unwrap();
    let second = harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-2"))
        .await
        .unwrap();

    let pending = harness
        .queue
        .list_pending(MutationFamily::EquipmentConfiguration)
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].local_id, first);
    assert_eq!(pending[1].local_id, second);
    assert!(first.as_i64() < second.as_i64());
}

#[tokio::test]
async fn a_synced_row_never_regresses() {
    let harness = setup().await;

    let id = harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-1"))
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert_eq!(report.total_synced(), 1);

    let synced = harness
        .queue
        .get(MutationFamily::EquipmentConfiguration, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(synced.status, MutationStatus::Synced);
    let synced_at = synced.synced_at.expect("synced_at stamped");

    // A later error transition must not undo the terminal state.
    harness
        .queue
        .set_status(
            MutationFamily::EquipmentConfiguration,
            id,
            MutationStatus::Error,
            Some("stale writer".into()),
        )
        .await
        .unwrap();

    let after = harness
        .queue
        .get(MutationFamily::EquipmentConfiguration, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.status, MutationStatus::Synced);
    assert_eq!(after.synced_at, Some(synced_at));
}

#[tokio::test]
async fn error_rows_stay_visible_and_pending_for_the_next_push() {
    let harness = setup().await;
    harness.backend.set_submit_failure(Some(FailureMode::Network));

    let id = harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-1"))
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert_eq!(report.total_failed(), 1);

    let failed = harness
        .queue
        .get(MutationFamily::EquipmentConfiguration, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failed.status, MutationStatus::Error);
    assert!(failed.error_message.is_some());

    // Error rows are part of the next pending batch.
    let pending = harness
        .queue
        .list_pending(MutationFamily::EquipmentConfiguration)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].local_id, id);
}
