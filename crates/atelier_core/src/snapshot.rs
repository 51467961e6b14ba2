//! Point-in-time export of the artifact store.

use crate::{ArtifactVersion, Container, GenerationStep};
use serde::{Deserialize, Serialize};

/// A full export of the persisted model.
///
/// Ordering is significant on import: containers in creation order, steps
/// ascending by sequence within their container, artifacts in append order
/// within their step. Deleted/pinned/selected flags round-trip verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// All containers, including soft-deleted ones
    pub containers: Vec<Container>,
    /// All steps, including those of soft-deleted containers
    pub steps: Vec<GenerationStep>,
    /// All artifact versions, including soft-deleted ones
    pub artifacts: Vec<ArtifactVersion>,
}

impl StoreSnapshot {
    /// Whether the snapshot holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.steps.is_empty() && self.artifacts.is_empty()
    }
}
