//! Ephemeral slot state for in-flight generation requests.
//!
//! Slots are pure in-memory value objects observed through the batch
//! event channel. Only successful outcomes cross into the store; a slot
//! itself is never persisted.

use crate::GenerationRequest;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of one generation slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotState {
    /// The provider call is in flight (or about to be retried)
    Pending,
    /// The call succeeded and its output was persisted
    Success {
        /// The artifact version the slot produced
        artifact_id: Uuid,
    },
    /// The call failed; retryable with the captured request
    Error {
        /// Human-readable failure message
        message: String,
    },
}

impl SlotState {
    /// Whether this state is terminal (success or error).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SlotState::Pending)
    }
}

/// One in-flight or just-resolved generation request within a batch.
///
/// A slot's identity lasts from issue until it resolves; after that it is
/// discarded in favor of the persisted artifact version (on success) or
/// kept around by the consumer as a retry affordance (on error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// The batch this slot belongs to
    pub batch_id: Uuid,
    /// Position within the batch (0-based; carries no resolution order)
    pub index: usize,
    /// The step successful output is appended under
    pub step_id: Uuid,
    /// The request captured at issue time
    pub request: GenerationRequest,
    /// Current lifecycle state
    pub state: SlotState,
}

impl Slot {
    /// Create a pending slot for the given batch position.
    pub fn pending(batch_id: Uuid, index: usize, step_id: Uuid, request: GenerationRequest) -> Self {
        Self {
            batch_id,
            index,
            step_id,
            request,
            state: SlotState::Pending,
        }
    }
}

/// Aggregate result of a settled batch.
///
/// Emitted exactly once per batch, after every slot has reached a
/// terminal state; consumers hang balance/usage refreshes off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct BatchSummary {
    /// The batch that settled
    batch_id: Uuid,
    /// The step the batch generated into
    step_id: Uuid,
    /// Number of slots issued
    requested: usize,
    /// Slots that reached `Success`
    succeeded: usize,
    /// Slots that reached `Error`
    failed: usize,
}

impl BatchSummary {
    /// Assemble a summary from terminal slot counts.
    pub fn new(
        batch_id: Uuid,
        step_id: Uuid,
        requested: usize,
        succeeded: usize,
        failed: usize,
    ) -> Self {
        Self {
            batch_id,
            step_id,
            requested,
            succeeded,
            failed,
        }
    }
}
