//! Tests for retrying failed slots and regenerating accepted artifacts.

mod stub_drivers;

use atelier_core::{GenerationRequest, SlotState};
use atelier_error::{AtelierError, AtelierErrorKind, StoreErrorKind};
use std::sync::Arc;
use stub_drivers::{ScriptedDriver, fixture, payload, request};
use uuid::Uuid;

fn store_error_kind(err: &AtelierError) -> Option<&StoreErrorKind> {
    match err.kind() {
        AtelierErrorKind::Store(e) => Some(&e.kind),
        _ => None,
    }
}

/// The end-to-end scenario: a 3-slot batch with one failure, then a
/// successful retry of the failed slot.
#[tokio::test]
async fn test_batch_then_retry_scenario() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Ok(payload("https://cdn.test/1.png")),
        Ok(payload("https://cdn.test/2.png")),
        Err("model overloaded".to_string()),
        // The retry call.
        Ok(payload("https://cdn.test/3.png")),
    ]));
    let (orchestrator, store) = fixture(driver);

    let container = store.create_container("C1").await.unwrap();
    let step = store
        .create_step(container.id, request("a cat"))
        .await
        .unwrap();
    assert_eq!(step.sequence, 1);

    let outcome = orchestrator
        .run_batch(&step, request("a cat"), 3)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();

    assert_eq!(*outcome.summary.succeeded(), 2);
    assert_eq!(*outcome.summary.failed(), 1);
    assert_eq!(
        store
            .list_artifacts(container.id, false)
            .await
            .unwrap()
            .len(),
        2
    );

    let failed = outcome
        .slots
        .iter()
        .find(|s| matches!(s.state, SlotState::Error { .. }))
        .unwrap();

    let retried = orchestrator
        .retry_slot(failed.step_id, failed.request.clone())
        .await
        .unwrap()
        .join()
        .await
        .unwrap();

    assert!(matches!(retried.state, SlotState::Success { .. }));
    let artifacts = store.list_artifacts(container.id, false).await.unwrap();
    assert_eq!(artifacts.len(), 3);
    assert!(artifacts.iter().all(|a| a.step_id == step.id));
}

#[tokio::test]
async fn test_retry_uses_captured_request_not_edited_prompt() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Err("boom".to_string()),
        Ok(payload("https://cdn.test/1.png")),
    ]));
    let (orchestrator, store) = fixture(Arc::clone(&driver));

    let container = store.create_container("session").await.unwrap();
    let step = store
        .create_step(container.id, request("first draft"))
        .await
        .unwrap();

    let outcome = orchestrator
        .run_batch(&step, request("first draft"), 1)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    let failed = outcome.slots.into_iter().next().unwrap();
    assert!(matches!(failed.state, SlotState::Error { .. }));

    // The user edits their prompt after the failure; the retry still
    // carries the captured request.
    let _edited = request("second draft");
    orchestrator
        .retry_slot(failed.step_id, failed.request.clone())
        .await
        .unwrap()
        .join()
        .await
        .unwrap();

    let prompts: Vec<_> = driver.seen().iter().map(|r| r.prompt.clone()).collect();
    assert_eq!(prompts, vec!["first draft", "first draft"]);
}

#[tokio::test]
async fn test_retry_returns_new_error_on_second_failure() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Err("first failure".to_string()),
        Err("second failure".to_string()),
    ]));
    let (orchestrator, store) = fixture(driver);

    let container = store.create_container("session").await.unwrap();
    let step = store
        .create_step(container.id, request("a cat"))
        .await
        .unwrap();

    let outcome = orchestrator
        .run_batch(&step, request("a cat"), 1)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    let failed = outcome.slots.into_iter().next().unwrap();

    let retried = orchestrator
        .retry_slot(failed.step_id, failed.request.clone())
        .await
        .unwrap()
        .join()
        .await
        .unwrap();

    match retried.state {
        SlotState::Error { message } => assert!(message.contains("second failure")),
        other => panic!("expected error state, got {:?}", other),
    }
    assert!(
        store
            .list_artifacts(container.id, false)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_retry_unknown_step() {
    let driver = Arc::new(ScriptedDriver::new(vec![]));
    let (orchestrator, _store) = fixture(driver);

    let err = orchestrator
        .retry_slot(Uuid::new_v4(), request("a cat"))
        .await
        .unwrap_err();
    assert!(matches!(
        store_error_kind(&err),
        Some(StoreErrorKind::StepNotFound(_))
    ));
}

#[tokio::test]
async fn test_regenerate_appends_without_touching_source() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Ok(payload("https://cdn.test/original.png")),
        Ok(payload("https://cdn.test/regenerated.png")),
    ]));
    let (orchestrator, store) = fixture(driver);

    let container = store.create_container("session").await.unwrap();
    let step = store
        .create_step(container.id, request("a cat"))
        .await
        .unwrap();

    let outcome = orchestrator
        .run_batch(&step, request("a cat"), 1)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    let source_id = match outcome.slots[0].state {
        SlotState::Success { artifact_id } => artifact_id,
        ref other => panic!("expected success, got {:?}", other),
    };

    let slot = orchestrator
        .regenerate(source_id, None)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    assert!(matches!(slot.state, SlotState::Success { .. }));
    assert_eq!(slot.step_id, step.id);

    let artifacts = store.list_artifacts(container.id, false).await.unwrap();
    assert_eq!(artifacts.len(), 2);

    // The source is still present, unmodified, and not soft-deleted.
    let source = store.artifact(source_id).await.unwrap();
    assert!(!source.deleted);
    assert_eq!(
        source.payload,
        payload("https://cdn.test/original.png")
    );
}

#[tokio::test]
async fn test_regenerate_with_current_prompt_override() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Ok(payload("https://cdn.test/1.png")),
        Ok(payload("https://cdn.test/2.png")),
    ]));
    let (orchestrator, store) = fixture(Arc::clone(&driver));

    let container = store.create_container("session").await.unwrap();
    let step = store
        .create_step(container.id, request("a cat"))
        .await
        .unwrap();

    let outcome = orchestrator
        .run_batch(&step, request("a cat"), 1)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    let source_id = match outcome.slots[0].state {
        SlotState::Success { artifact_id } => artifact_id,
        ref other => panic!("expected success, got {:?}", other),
    };

    let current: GenerationRequest = request("a cat wearing a hat");
    orchestrator
        .regenerate(source_id, Some(current))
        .await
        .unwrap()
        .join()
        .await
        .unwrap();

    let prompts: Vec<_> = driver.seen().iter().map(|r| r.prompt.clone()).collect();
    assert_eq!(prompts, vec!["a cat", "a cat wearing a hat"]);
}

#[tokio::test]
async fn test_regenerate_deleted_source_still_appends() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Ok(payload("https://cdn.test/1.png")),
        Ok(payload("https://cdn.test/2.png")),
    ]));
    let (orchestrator, store) = fixture(driver);

    let container = store.create_container("session").await.unwrap();
    let step = store
        .create_step(container.id, request("a cat"))
        .await
        .unwrap();

    let outcome = orchestrator
        .run_batch(&step, request("a cat"), 1)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    let source_id = match outcome.slots[0].state {
        SlotState::Success { artifact_id } => artifact_id,
        ref other => panic!("expected success, got {:?}", other),
    };

    store.soft_delete_artifact(source_id).await.unwrap();

    let slot = orchestrator
        .regenerate(source_id, None)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    assert!(matches!(slot.state, SlotState::Success { .. }));

    // The new version is visible; the deleted source stays hidden.
    let visible = store.list_artifacts(container.id, false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_ne!(visible[0].id, source_id);
    let all = store.list_artifacts(container.id, true).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_regenerate_failure_is_not_destructive() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Ok(payload("https://cdn.test/1.png")),
        Err("provider down".to_string()),
    ]));
    let (orchestrator, store) = fixture(driver);

    let container = store.create_container("session").await.unwrap();
    let step = store
        .create_step(container.id, request("a cat"))
        .await
        .unwrap();

    let outcome = orchestrator
        .run_batch(&step, request("a cat"), 1)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    let source_id = match outcome.slots[0].state {
        SlotState::Success { artifact_id } => artifact_id,
        ref other => panic!("expected success, got {:?}", other),
    };

    let slot = orchestrator
        .regenerate(source_id, None)
        .await
        .unwrap()
        .join()
        .await
        .unwrap();
    assert!(matches!(slot.state, SlotState::Error { .. }));

    // The original remains the only version, untouched.
    let artifacts = store.list_artifacts(container.id, false).await.unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].id, source_id);
}

#[tokio::test]
async fn test_regenerate_unknown_source() {
    let driver = Arc::new(ScriptedDriver::new(vec![]));
    let (orchestrator, _store) = fixture(driver);

    let err = orchestrator
        .regenerate(Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        store_error_kind(&err),
        Some(StoreErrorKind::ArtifactNotFound(_))
    ));
}
