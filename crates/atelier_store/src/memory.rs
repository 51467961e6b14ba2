//! In-memory backend implementation for tests and ephemeral sessions.

use async_trait::async_trait;
use atelier_core::{ArtifactVersion, Container, GenerationStep, StoreSnapshot};
use atelier_error::AtelierResult;
use atelier_interface::StoreBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Record maps keyed by id, with insertion order retained for snapshots.
#[derive(Debug, Default)]
struct MemoryState {
    containers: HashMap<Uuid, Container>,
    container_order: Vec<Uuid>,
    steps: HashMap<Uuid, GenerationStep>,
    step_order: Vec<Uuid>,
    artifacts: HashMap<Uuid, ArtifactVersion>,
    artifact_order: Vec<Uuid>,
}

/// Backend that holds documents in a HashMap protected by an RwLock.
///
/// All data is lost when the backend is dropped. Useful for unit tests and
/// demonstrating the trait interface.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<MemoryState>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all record kinds (for testing).
    pub async fn len(&self) -> usize {
        let state = self.inner.read().await;
        state.containers.len() + state.steps.len() + state.artifacts.len()
    }

    /// Check if the backend holds no documents (for testing).
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn put_container(&self, container: &Container) -> AtelierResult<()> {
        let mut state = self.inner.write().await;
        if state
            .containers
            .insert(container.id, container.clone())
            .is_none()
        {
            state.container_order.push(container.id);
        }
        Ok(())
    }

    async fn put_step(&self, step: &GenerationStep) -> AtelierResult<()> {
        let mut state = self.inner.write().await;
        if state.steps.insert(step.id, step.clone()).is_none() {
            state.step_order.push(step.id);
        }
        Ok(())
    }

    async fn put_artifact(&self, artifact: &ArtifactVersion) -> AtelierResult<()> {
        let mut state = self.inner.write().await;
        if state.artifacts.insert(artifact.id, artifact.clone()).is_none() {
            state.artifact_order.push(artifact.id);
        }
        Ok(())
    }

    async fn load_snapshot(&self) -> AtelierResult<StoreSnapshot> {
        let state = self.inner.read().await;
        Ok(StoreSnapshot {
            containers: state
                .container_order
                .iter()
                .filter_map(|id| state.containers.get(id))
                .cloned()
                .collect(),
            steps: state
                .step_order
                .iter()
                .filter_map(|id| state.steps.get(id))
                .cloned()
                .collect(),
            artifacts: state
                .artifact_order
                .iter()
                .filter_map(|id| state.artifacts.get(id))
                .cloned()
                .collect(),
        })
    }
}
