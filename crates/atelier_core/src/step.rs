//! Generation steps: one batch-generation event within a container.

use crate::GenerationRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One batch-generation event within a container.
///
/// The sequence number is assigned by the store atomically at creation
/// time and is strictly increasing per container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStep {
    /// Unique identifier
    pub id: Uuid,
    /// Owning container
    pub container_id: Uuid,
    /// Monotonic position within the container
    pub sequence: u64,
    /// The captured prompt and parameters this step was issued with
    pub request: GenerationRequest,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl GenerationStep {
    /// Create a step record. Sequence assignment belongs to the store;
    /// this constructor just assembles the record.
    pub fn new(container_id: Uuid, sequence: u64, request: GenerationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            container_id,
            sequence,
            request,
            created_at: Utc::now(),
        }
    }
}
