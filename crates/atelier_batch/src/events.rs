//! Batch observation: incremental events and settlement handles.
//!
//! Handles separate the observer from the writer. Dropping a handle (or
//! calling `detach`) only stops observation; outstanding provider calls run
//! to completion and their successes are still persisted, because every
//! store write happens before the corresponding event send.

use atelier_core::{BatchSummary, Slot, SlotState};
use atelier_error::{AtelierResult, BatchError, BatchErrorKind};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Incremental update emitted while a batch is in flight.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// One slot changed state (`Pending` at issue, then its terminal state)
    Slot {
        /// The batch the slot belongs to
        batch_id: Uuid,
        /// Position of the slot within the batch
        index: usize,
        /// The slot's new state
        state: SlotState,
    },
    /// Every slot has reached a terminal state. Fires exactly once per
    /// batch, after all slot events.
    Settled {
        /// Aggregate counts for the batch
        summary: BatchSummary,
    },
}

/// Terminal result of a settled batch: the summary plus every slot in
/// issue order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// Aggregate counts
    pub summary: BatchSummary,
    /// All slots, each in a terminal state, ordered by index
    pub slots: Vec<Slot>,
}

/// Observer handle for a running batch.
#[derive(Debug)]
pub struct BatchHandle {
    batch_id: Uuid,
    step_id: Uuid,
    events: mpsc::UnboundedReceiver<BatchEvent>,
    outcome: oneshot::Receiver<BatchOutcome>,
}

impl BatchHandle {
    pub(crate) fn new(
        batch_id: Uuid,
        step_id: Uuid,
        events: mpsc::UnboundedReceiver<BatchEvent>,
        outcome: oneshot::Receiver<BatchOutcome>,
    ) -> Self {
        Self {
            batch_id,
            step_id,
            events,
            outcome,
        }
    }

    /// The batch identifier.
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    /// The step this batch generates into.
    pub fn step_id(&self) -> Uuid {
        self.step_id
    }

    /// Receive the next incremental event, or `None` once the batch has
    /// settled and the channel drained.
    pub async fn recv(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Wait for settlement and return the terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` if the supervising task was torn down before
    /// the batch settled (runtime shutdown).
    pub async fn join(self) -> AtelierResult<BatchOutcome> {
        self.outcome.await.map_err(|_| {
            BatchError::new(BatchErrorKind::Interrupted(
                "settlement signal dropped before completion".to_string(),
            ))
            .into()
        })
    }

    /// Abandon observation. Outstanding generations run to completion and
    /// their results are still persisted.
    pub fn detach(self) {
        drop(self);
    }
}

/// Observer handle for a single retried or regenerated slot.
#[derive(Debug)]
pub struct SlotHandle {
    batch_id: Uuid,
    step_id: Uuid,
    events: mpsc::UnboundedReceiver<BatchEvent>,
    outcome: oneshot::Receiver<Slot>,
}

impl SlotHandle {
    pub(crate) fn new(
        batch_id: Uuid,
        step_id: Uuid,
        events: mpsc::UnboundedReceiver<BatchEvent>,
        outcome: oneshot::Receiver<Slot>,
    ) -> Self {
        Self {
            batch_id,
            step_id,
            events,
            outcome,
        }
    }

    /// Identifier of this single-slot operation.
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    /// The step the slot's output is appended under.
    pub fn step_id(&self) -> Uuid {
        self.step_id
    }

    /// Receive the next state update (`Pending`, then the terminal state).
    pub async fn recv(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Wait for the slot to reach a terminal state.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` if the slot task was torn down before
    /// resolving (runtime shutdown).
    pub async fn join(self) -> AtelierResult<Slot> {
        self.outcome.await.map_err(|_| {
            BatchError::new(BatchErrorKind::Interrupted(
                "slot signal dropped before completion".to_string(),
            ))
            .into()
        })
    }

    /// Abandon observation without cancelling the underlying call.
    pub fn detach(self) {
        drop(self);
    }
}
