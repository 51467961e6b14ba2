//! Artifact versions: concrete generated outputs.

use crate::ArtifactPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One concrete generated output belonging to a step.
///
/// Versions accumulate under a step over time: the initial batch appends
/// one per successful slot, and every regeneration appends another. A
/// source version is never mutated or removed by regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactVersion {
    /// Unique identifier
    pub id: Uuid,
    /// Owning step
    pub step_id: Uuid,
    /// Reference to the generated content
    pub payload: ArtifactPayload,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Soft-delete flag; hidden from default listings when set
    pub deleted: bool,
    /// Marks the version the user is currently choosing among siblings
    pub selected: bool,
    /// Pinned flag, independent of selection; survives across steps
    pub pinned: bool,
}

impl ArtifactVersion {
    /// Create a fresh version for the given step.
    pub fn new(step_id: Uuid, payload: ArtifactPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            step_id,
            payload,
            created_at: Utc::now(),
            deleted: false,
            selected: false,
            pinned: false,
        }
    }
}
