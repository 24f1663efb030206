mod common;

use common::mocks::FailureMode;
use common::{
    checklist_payload, config_payload, maintenance_payload, photo_batch_payload, setup,
    technician, write_photo,
};
use fieldsync::domain::entities::queue::MutationPayload;
use fieldsync::domain::value_objects::{MediaStatus, MutationFamily, MutationStatus};

#[tokio::test]
async fn push_uploads_media_then_submits_rewritten_payload() {
    let harness = setup().await;
    let photo_a = write_photo(&harness.temp, "a.jpg", b"photo-a");
    let photo_b = write_photo(&harness.temp, "b.jpg", b"photo-b");

    let id = harness
        .queue_service
        .enqueue_maintenance(
            technician(),
            maintenance_payload("EQ-1", Some("WO-9"), vec![photo_a, photo_b]),
        )
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert!(!report.skipped_offline);
    assert_eq!(report.total_synced(), 1);
    assert_eq!(report.total_failed(), 0);

    // Remote payload carries remote URLs only.
    let submissions = harness.backend.maintenance_submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert!(submissions[0]
        .photos_pre
        .iter()
        .all(|uri| uri.starts_with("https://cdn.test/pre/")));
    drop(submissions);

    // Linked work order advanced after the submission landed.
    assert_eq!(
        *harness.backend.work_order_updates.lock().unwrap(),
        vec![("WO-9".to_string(), "completed".to_string())]
    );

    let mutation = harness
        .queue
        .get(MutationFamily::MaintenanceSubmission, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mutation.status, MutationStatus::Synced);
    assert!(mutation.synced_at.is_some());
    assert_eq!(mutation.remote_id.as_deref(), Some("remote-maint-1"));

    // The stored payload is the rewritten one (audit trail shows what the
    // remote system received).
    let MutationPayload::MaintenanceSubmission(stored) = mutation.payload else {
        panic!("family changed");
    };
    assert!(stored
        .photos_pre
        .iter()
        .all(|uri| uri.starts_with("https://cdn.test/pre/")));

    let assets = harness
        .queue
        .list_media(MutationFamily::MaintenanceSubmission, id)
        .await
        .unwrap();
    assert!(assets.iter().all(|a| a.status == MediaStatus::Synced));
    assert!(assets.iter().all(|a| a.remote_url.is_some()));
}

#[tokio::test]
async fn media_failure_aborts_the_item_before_submission() {
    let harness = setup().await;
    // First photo's blob is poisoned; its upload throws a network error.
    let bad = write_photo(&harness.temp, "bad.jpg", b"FAIL bad bytes");
    let good = write_photo(&harness.temp, "good.jpg", b"photo-good");

    let id = harness
        .queue_service
        .enqueue_maintenance(
            technician(),
            maintenance_payload("EQ-1", None, vec![bad, good]),
        )
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert_eq!(report.total_failed(), 1);

    let mutation = harness
        .queue
        .get(MutationFamily::MaintenanceSubmission, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mutation.status, MutationStatus::Error);
    assert!(mutation.error_message.is_some());

    // No asset advanced past pending and the payload was never submitted.
    let assets = harness
        .queue
        .list_media(MutationFamily::MaintenanceSubmission, id)
        .await
        .unwrap();
    assert!(assets.iter().all(|a| a.status != MediaStatus::Synced));
    assert_eq!(assets[1].status, MediaStatus::Pending);
    assert!(harness.backend.maintenance_submissions.lock().unwrap().is_empty());
    assert_eq!(harness.media.upload_count(), 0);
}

#[tokio::test]
async fn next_push_retries_both_uploads_after_a_media_failure() {
    let harness = setup().await;
    let bad = write_photo(&harness.temp, "flaky.jpg", b"FAIL transient");
    let good = write_photo(&harness.temp, "steady.jpg", b"photo-steady");

    let id = harness
        .queue_service
        .enqueue_maintenance(
            technician(),
            maintenance_payload("EQ-1", None, vec![bad.clone(), good]),
        )
        .await
        .unwrap();

    assert_eq!(harness.sync.push_pending_work().await.unwrap().total_failed(), 1);

    // The blob becomes readable; the retry starts over from media upload.
    write_photo(&harness.temp, "flaky.jpg", b"photo-recovered");

    let report = harness.sync.push_pending_work().await.unwrap();
    assert_eq!(report.total_synced(), 1);

    let mutation = harness
        .queue
        .get(MutationFamily::MaintenanceSubmission, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mutation.status, MutationStatus::Synced);

    let assets = harness
        .queue
        .list_media(MutationFamily::MaintenanceSubmission, id)
        .await
        .unwrap();
    assert!(assets.iter().all(|a| a.status == MediaStatus::Synced));
    // Both photos uploaded on the second attempt; nothing was uploaded on
    // the aborted first attempt.
    assert_eq!(harness.media.upload_count(), 2);
}

#[tokio::test]
async fn one_failing_item_does_not_block_its_siblings() {
    let harness = setup().await;
    let bad = write_photo(&harness.temp, "bad.jpg", b"FAIL again");

    let failing = harness
        .queue_service
        .enqueue_maintenance(technician(), maintenance_payload("EQ-1", None, vec![bad]))
        .await
        .unwrap();
    let clean = harness
        .queue_service
        .enqueue_maintenance(technician(), maintenance_payload("EQ-2", None, vec![]))
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert_eq!(report.total_synced(), 1);
    assert_eq!(report.total_failed(), 1);

    let failing_row = harness
        .queue
        .get(MutationFamily::MaintenanceSubmission, failing)
        .await
        .unwrap()
        .unwrap();
    let clean_row = harness
        .queue
        .get(MutationFamily::MaintenanceSubmission, clean)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failing_row.status, MutationStatus::Error);
    assert_eq!(clean_row.status, MutationStatus::Synced);
}

#[tokio::test]
async fn items_within_a_family_sync_in_creation_order() {
    let harness = setup().await;

    for equipment in ["EQ-1", "EQ-2", "EQ-3"] {
        harness
            .queue_service
            .enqueue_maintenance(technician(), maintenance_payload(equipment, None, vec![]))
            .await
            .unwrap();
    }

    harness.sync.push_pending_work().await.unwrap();

    let submitted: Vec<String> = harness
        .backend
        .maintenance_submissions
        .lock()
        .unwrap()
        .iter()
        .map(|payload| payload.equipment_id.clone())
        .collect();
    assert_eq!(submitted, vec!["EQ-1", "EQ-2", "EQ-3"]);
}

#[tokio::test]
async fn push_while_offline_touches_nothing() {
    let harness = setup().await;
    harness.connectivity.set(false);

    let id = harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-1"))
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert!(report.skipped_offline);
    assert!(report.families.is_empty());

    let mutation = harness
        .queue
        .get(MutationFamily::EquipmentConfiguration, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mutation.status, MutationStatus::Pending);
    assert!(harness.backend.equipment_updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn remote_403_lands_in_the_error_column() {
    let harness = setup().await;
    harness.backend.set_submit_failure(Some(FailureMode::Forbidden));

    let id = harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-1"))
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert_eq!(report.total_failed(), 1);

    let mutation = harness
        .queue
        .get(MutationFamily::EquipmentConfiguration, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mutation.status, MutationStatus::Error);
    assert!(mutation
        .error_message
        .as_deref()
        .unwrap()
        .contains("403 Forbidden"));
}

#[tokio::test]
async fn all_four_families_drain_in_push_order() {
    let harness = setup().await;
    let checklist_photo = write_photo(&harness.temp, "item.jpg", b"photo-item");
    let session_photo = write_photo(&harness.temp, "s1.jpg", b"photo-s1");

    harness
        .queue_service
        .enqueue_maintenance(technician(), maintenance_payload("EQ-1", None, vec![]))
        .await
        .unwrap();
    harness
        .queue_service
        .enqueue_equipment_configuration(technician(), config_payload("EQ-2"))
        .await
        .unwrap();
    harness
        .queue_service
        .enqueue_inspection_checklist(technician(), checklist_payload("EQ-1", Some(checklist_photo)))
        .await
        .unwrap();
    harness
        .queue_service
        .enqueue_photo_batch(technician(), photo_batch_payload("WS-1", vec![session_photo]))
        .await
        .unwrap();

    let report = harness.sync.push_pending_work().await.unwrap();
    assert_eq!(report.total_synced(), 4);

    let processed: Vec<MutationFamily> = report.families.iter().map(|f| f.family).collect();
    assert_eq!(processed, MutationFamily::PUSH_ORDER.to_vec());

    assert_eq!(harness.backend.maintenance_submissions.lock().unwrap().len(), 1);
    assert_eq!(harness.backend.equipment_updates.lock().unwrap().len(), 1);
    assert_eq!(harness.backend.checklist_submissions.lock().unwrap().len(), 1);
    assert_eq!(harness.backend.photo_batches.lock().unwrap().len(), 1);

    // Checklist item photo and session photo were rewritten before submit.
    let checklists = harness.backend.checklist_submissions.lock().unwrap();
    assert!(checklists[0].items[0]
        .photo_uri
        .as_deref()
        .unwrap()
        .starts_with("https://cdn.test/checklist-item/"));
    let batches = harness.backend.photo_batches.lock().unwrap();
    assert!(batches[0].photo_uris[0].starts_with("https://cdn.test/session/"));

    // The checklist's linked work order advanced too.
    assert!(harness
        .backend
        .work_order_updates
        .lock()
        .unwrap()
        .contains(&("WO-5".to_string(), "completed".to_string())));
}
