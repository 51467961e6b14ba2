//! The slot orchestrator.

use crate::{BatchEvent, BatchHandle, BatchOutcome, OrchestratorConfig};
use atelier_core::{BatchSummary, GenerationRequest, GenerationStep, Slot, SlotState};
use atelier_error::{AtelierResult, BatchError, BatchErrorKind};
use atelier_interface::{ArtifactValidator, DriverSource, GenerationDriver};
use atelier_store::ArtifactStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Executes batch generation requests and surfaces per-slot progress
/// without blocking on the slowest or failing call.
///
/// All N provider calls for a batch are issued before any is awaited, so
/// their latencies overlap. Each call's outcome updates exactly one slot;
/// siblings are never cancelled or retried automatically. Successful
/// outcomes are appended to the artifact store before the observer is
/// notified, so a torn-down observer never loses generated work.
pub struct BatchOrchestrator {
    drivers: Arc<dyn DriverSource>,
    store: Arc<ArtifactStore>,
    validator: Option<Arc<dyn ArtifactValidator>>,
    config: OrchestratorConfig,
}

impl BatchOrchestrator {
    /// Create an orchestrator over the given driver source and store.
    pub fn new(drivers: Arc<dyn DriverSource>, store: Arc<ArtifactStore>) -> Self {
        Self {
            drivers,
            store,
            validator: None,
            config: OrchestratorConfig::default(),
        }
    }

    /// Add a post-generation validator.
    ///
    /// A rejected payload fails its slot like a provider error; nothing is
    /// persisted for it.
    pub fn with_validator(mut self, validator: Arc<dyn ArtifactValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// The artifact store this orchestrator writes into.
    pub fn store(&self) -> &Arc<ArtifactStore> {
        &self.store
    }

    /// Issue a batch of `count` independent generation calls for a step.
    ///
    /// The request is captured here; later edits by the caller never reach
    /// in-flight or retried slots. Returns a handle streaming one
    /// `Pending` and one terminal event per slot, then a single `Settled`
    /// event once all outcomes have resolved. `count == 0` settles
    /// immediately with no slots.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the driver cannot be acquired; no slot is
    /// issued and no state is created.
    #[tracing::instrument(
        skip(self, step, request),
        fields(step = %step.id, count, prompt = %request.prompt)
    )]
    pub async fn run_batch(
        &self,
        step: &GenerationStep,
        mut request: GenerationRequest,
        count: usize,
    ) -> AtelierResult<BatchHandle> {
        let driver = self.acquire_driver()?;
        if request.model.is_none() {
            request.model = self.config.model.clone();
        }

        let batch_id = Uuid::new_v4();
        let step_id = step.id;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = oneshot::channel();

        tracing::info!(
            batch = %batch_id,
            step = %step_id,
            count,
            provider = driver.provider_name(),
            "Issuing batch"
        );

        let mut handles = Vec::with_capacity(count);
        for index in 0..count {
            let slot = Slot::pending(batch_id, index, step_id, request.clone());
            let _ = event_tx.send(BatchEvent::Slot {
                batch_id,
                index,
                state: SlotState::Pending,
            });
            handles.push(tokio::spawn(Self::execute_slot(
                Arc::clone(&driver),
                Arc::clone(&self.store),
                self.validator.clone(),
                slot,
                event_tx.clone(),
            )));
        }

        let captured = request;
        tokio::spawn(async move {
            let results = futures::future::join_all(handles).await;
            let mut slots = Vec::with_capacity(count);
            for (index, result) in results.into_iter().enumerate() {
                match result {
                    Ok(slot) => slots.push(slot),
                    Err(e) => {
                        tracing::error!(batch = %batch_id, slot = index, error = %e, "Slot task failed");
                        slots.push(Slot {
                            batch_id,
                            index,
                            step_id,
                            request: captured.clone(),
                            state: SlotState::Error {
                                message: format!("slot task failed: {}", e),
                            },
                        });
                    }
                }
            }

            let succeeded = slots
                .iter()
                .filter(|s| matches!(s.state, SlotState::Success { .. }))
                .count();
            let failed = slots.len() - succeeded;
            let summary = BatchSummary::new(batch_id, step_id, count, succeeded, failed);

            tracing::info!(
                batch = %batch_id,
                requested = count,
                succeeded,
                failed,
                "Batch settled"
            );

            let _ = event_tx.send(BatchEvent::Settled {
                summary: summary.clone(),
            });
            let _ = outcome_tx.send(BatchOutcome { summary, slots });
        });

        Ok(BatchHandle::new(batch_id, step_id, event_rx, outcome_rx))
    }

    /// Issue a batch sized by the configured default count.
    ///
    /// # Errors
    ///
    /// Same as [`run_batch`](Self::run_batch).
    pub async fn run_batch_default(
        &self,
        step: &GenerationStep,
        request: GenerationRequest,
    ) -> AtelierResult<BatchHandle> {
        self.run_batch(step, request, self.config.default_count).await
    }

    /// Acquire a driver or convert the failure into a batch precondition.
    pub(crate) fn acquire_driver(&self) -> AtelierResult<Arc<dyn GenerationDriver>> {
        self.drivers.acquire().map_err(|e| {
            tracing::error!(error = %e, "Generation driver unavailable");
            BatchError::new(BatchErrorKind::Precondition(e.to_string())).into()
        })
    }

    pub(crate) fn store_arc(&self) -> Arc<ArtifactStore> {
        Arc::clone(&self.store)
    }

    pub(crate) fn validator_arc(&self) -> Option<Arc<dyn ArtifactValidator>> {
        self.validator.clone()
    }

    /// Drive one slot to its terminal state and emit the update.
    ///
    /// The store write completes before the event send; event sends are
    /// best-effort because the observer may already be gone.
    #[tracing::instrument(
        skip(driver, store, validator, slot, events),
        fields(batch = %slot.batch_id, slot = slot.index, step = %slot.step_id)
    )]
    pub(crate) async fn execute_slot(
        driver: Arc<dyn GenerationDriver>,
        store: Arc<ArtifactStore>,
        validator: Option<Arc<dyn ArtifactValidator>>,
        mut slot: Slot,
        events: mpsc::UnboundedSender<BatchEvent>,
    ) -> Slot {
        slot.state = Self::resolve_slot(&*driver, &store, validator.as_deref(), &slot).await;
        let _ = events.send(BatchEvent::Slot {
            batch_id: slot.batch_id,
            index: slot.index,
            state: slot.state.clone(),
        });
        slot
    }

    /// Generate, validate, and persist one slot's output. Every failure is
    /// recovered locally into an `Error` state; nothing raises past here.
    async fn resolve_slot(
        driver: &dyn GenerationDriver,
        store: &ArtifactStore,
        validator: Option<&dyn ArtifactValidator>,
        slot: &Slot,
    ) -> SlotState {
        let payload = match driver.generate(&slot.request).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(
                    batch = %slot.batch_id,
                    slot = slot.index,
                    step = %slot.step_id,
                    prompt = %slot.request.prompt,
                    error = %e,
                    "Slot generation failed"
                );
                return SlotState::Error {
                    message: e.to_string(),
                };
            }
        };

        if let Some(validator) = validator
            && let Err(e) = validator.validate(&slot.request, &payload).await
        {
            tracing::warn!(
                batch = %slot.batch_id,
                slot = slot.index,
                step = %slot.step_id,
                error = %e,
                "Generated artifact rejected"
            );
            return SlotState::Error {
                message: e.to_string(),
            };
        }

        match store.append_artifact(slot.step_id, payload).await {
            Ok(artifact) => SlotState::Success {
                artifact_id: artifact.id,
            },
            Err(e) => {
                tracing::error!(
                    batch = %slot.batch_id,
                    slot = slot.index,
                    step = %slot.step_id,
                    error = %e,
                    "Failed to persist artifact"
                );
                SlotState::Error {
                    message: e.to_string(),
                }
            }
        }
    }
}
