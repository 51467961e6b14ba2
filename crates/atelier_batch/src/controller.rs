//! Retry and regenerate entry points.
//!
//! Both operations re-enter the same single-slot pipeline the batch path
//! uses. Neither acquires a lock on the step or container; they are
//! fire-and-forget relative to any other in-flight slot.

use crate::{BatchEvent, BatchOrchestrator, SlotHandle};
use atelier_core::{GenerationRequest, Slot, SlotState};
use atelier_error::{AtelierResult, StoreError, StoreErrorKind};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

impl BatchOrchestrator {
    /// Re-issue exactly one failed slot with its captured request.
    ///
    /// The caller passes back the request the failed slot carried, not the
    /// live prompt — edits made after the original batch never leak into a
    /// retry. On success a new artifact version is appended under the same
    /// step; on failure the slot resolves to `Error` with the new message.
    /// Sibling slots are unaffected either way.
    ///
    /// # Errors
    ///
    /// Returns `StepNotFound` if the step is unknown, or `Precondition` if
    /// the driver cannot be acquired.
    #[tracing::instrument(skip(self, request), fields(step = %step_id, prompt = %request.prompt))]
    pub async fn retry_slot(
        &self,
        step_id: Uuid,
        request: GenerationRequest,
    ) -> AtelierResult<SlotHandle> {
        let step = self.store().step(step_id).await.ok_or_else(|| {
            StoreError::new(StoreErrorKind::StepNotFound(step_id.to_string()))
        })?;

        tracing::info!(step = %step.id, "Retrying failed slot");
        self.issue_single(step.id, request)
    }

    /// Issue one new call tied to an already-accepted artifact.
    ///
    /// On success a brand-new version is appended under the source
    /// artifact's step; the source is left untouched and remains visible.
    /// On failure nothing is replaced — the outcome resolves to `Error`
    /// and the failure is logged, not treated as destructive.
    ///
    /// The source only has to exist; a soft-deleted source is a legal
    /// regeneration target. `request = None` reuses the step's captured
    /// request; passing `Some` regenerates with the caller's current
    /// prompt instead.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactNotFound` if the source is unknown, or
    /// `Precondition` if the driver cannot be acquired.
    #[tracing::instrument(skip(self, request), fields(source = %source_artifact_id))]
    pub async fn regenerate(
        &self,
        source_artifact_id: Uuid,
        request: Option<GenerationRequest>,
    ) -> AtelierResult<SlotHandle> {
        let source = self.store().artifact(source_artifact_id).await.ok_or_else(|| {
            StoreError::new(StoreErrorKind::ArtifactNotFound(
                source_artifact_id.to_string(),
            ))
        })?;
        let step = self.store().step(source.step_id).await.ok_or_else(|| {
            StoreError::new(StoreErrorKind::StepNotFound(source.step_id.to_string()))
        })?;

        let request = request.unwrap_or_else(|| step.request.clone());

        tracing::info!(
            source = %source_artifact_id,
            step = %step.id,
            prompt = %request.prompt,
            "Regenerating artifact"
        );
        self.issue_single(step.id, request)
    }

    /// The shared single-slot pipeline behind retry and regenerate.
    fn issue_single(
        &self,
        step_id: Uuid,
        request: GenerationRequest,
    ) -> AtelierResult<SlotHandle> {
        let driver = self.acquire_driver()?;

        let batch_id = Uuid::new_v4();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let slot = Slot::pending(batch_id, 0, step_id, request);
        let _ = event_tx.send(BatchEvent::Slot {
            batch_id,
            index: 0,
            state: SlotState::Pending,
        });

        let store = self.store_arc();
        let validator = self.validator_arc();
        tokio::spawn(async move {
            let slot = Self::execute_slot(driver, store, validator, slot, event_tx).await;
            let _ = outcome_tx.send(slot);
        });

        Ok(SlotHandle::new(batch_id, step_id, event_rx, outcome_rx))
    }
}
