//! The artifact store: in-memory state with write-through persistence.

use atelier_core::{
    ArtifactPayload, ArtifactVersion, Container, GenerationRequest, GenerationStep, StoreSnapshot,
};
use atelier_error::{AtelierResult, StoreError, StoreErrorKind};
use atelier_interface::StoreBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory record maps plus the listing orders derived from them.
#[derive(Debug, Default)]
struct StoreState {
    containers: HashMap<Uuid, Container>,
    /// Containers in creation order
    container_order: Vec<Uuid>,
    steps: HashMap<Uuid, GenerationStep>,
    /// Steps per container, in creation (= ascending sequence) order
    container_steps: HashMap<Uuid, Vec<Uuid>>,
    artifacts: HashMap<Uuid, ArtifactVersion>,
    /// Artifact versions per step, in append-completion order
    step_artifacts: HashMap<Uuid, Vec<Uuid>>,
}

/// Durable, versioned record of containers, steps, and artifact versions.
///
/// All mutations take the write lock for their full duration, including the
/// write-through to the backend, so sequence assignment and list appends are
/// atomic with respect to concurrent callers. A backend failure surfaces as
/// an error but leaves the in-memory record committed; the durable copy
/// catches up on the next write of the same record.
#[derive(Debug)]
pub struct ArtifactStore {
    state: RwLock<StoreState>,
    backend: Arc<dyn StoreBackend>,
}

impl ArtifactStore {
    /// Create an empty store writing through to the given backend.
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            backend,
        }
    }

    /// Restore a store from whatever the backend holds.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read or the snapshot contains
    /// dangling references.
    pub async fn load(backend: Arc<dyn StoreBackend>) -> AtelierResult<Self> {
        let snapshot = backend.load_snapshot().await?;
        Self::from_snapshot(snapshot, backend)
    }

    /// Rebuild a store from an exported snapshot.
    ///
    /// Snapshot ordering is preserved verbatim: containers in creation
    /// order, steps ascending by sequence, artifacts in append order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if a step references a missing container or an
    /// artifact references a missing step.
    pub fn from_snapshot(
        snapshot: StoreSnapshot,
        backend: Arc<dyn StoreBackend>,
    ) -> AtelierResult<Self> {
        let mut state = StoreState::default();

        for container in snapshot.containers {
            state.container_order.push(container.id);
            state.container_steps.entry(container.id).or_default();
            state.containers.insert(container.id, container);
        }

        for step in snapshot.steps {
            if !state.containers.contains_key(&step.container_id) {
                return Err(StoreError::new(StoreErrorKind::InvalidState(format!(
                    "step {} references missing container {}",
                    step.id, step.container_id
                )))
                .into());
            }
            state
                .container_steps
                .entry(step.container_id)
                .or_default()
                .push(step.id);
            state.step_artifacts.entry(step.id).or_default();
            state.steps.insert(step.id, step);
        }

        for artifact in snapshot.artifacts {
            if !state.steps.contains_key(&artifact.step_id) {
                return Err(StoreError::new(StoreErrorKind::InvalidState(format!(
                    "artifact {} references missing step {}",
                    artifact.id, artifact.step_id
                )))
                .into());
            }
            state
                .step_artifacts
                .entry(artifact.step_id)
                .or_default()
                .push(artifact.id);
            state.artifacts.insert(artifact.id, artifact);
        }

        Ok(Self {
            state: RwLock::new(state),
            backend,
        })
    }

    /// Create a new container with the given title.
    #[tracing::instrument(skip(self))]
    pub async fn create_container(&self, title: &str) -> AtelierResult<Container> {
        let container = Container::new(title);

        let mut state = self.state.write().await;
        state.container_order.push(container.id);
        state.container_steps.entry(container.id).or_default();
        state.containers.insert(container.id, container.clone());

        self.backend.put_container(&container).await?;

        tracing::info!(container = %container.id, title = %container.title, "Created container");
        Ok(container)
    }

    /// Create a generation step, assigning the container's next sequence
    /// number atomically.
    ///
    /// # Errors
    ///
    /// Returns `ContainerNotFound` if the container is unknown or
    /// soft-deleted.
    #[tracing::instrument(skip(self, request), fields(prompt = %request.prompt))]
    pub async fn create_step(
        &self,
        container_id: Uuid,
        request: GenerationRequest,
    ) -> AtelierResult<GenerationStep> {
        let mut state = self.state.write().await;

        let container = state
            .containers
            .get_mut(&container_id)
            .filter(|c| !c.deleted)
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::ContainerNotFound(container_id.to_string()))
            })?;

        let sequence = container.next_sequence;
        container.next_sequence += 1;
        let container = container.clone();

        let step = GenerationStep::new(container_id, sequence, request);
        state
            .container_steps
            .entry(container_id)
            .or_default()
            .push(step.id);
        state.step_artifacts.entry(step.id).or_default();
        state.steps.insert(step.id, step.clone());

        self.backend.put_container(&container).await?;
        self.backend.put_step(&step).await?;

        tracing::info!(
            container = %container_id,
            step = %step.id,
            sequence = step.sequence,
            "Created generation step"
        );
        Ok(step)
    }

    /// Append a new artifact version under a step.
    ///
    /// Versions accumulate in append-completion order; nothing already
    /// under the step is touched.
    ///
    /// # Errors
    ///
    /// Returns `StepNotFound` if the step is unknown.
    #[tracing::instrument(skip(self, payload))]
    pub async fn append_artifact(
        &self,
        step_id: Uuid,
        payload: ArtifactPayload,
    ) -> AtelierResult<ArtifactVersion> {
        let mut state = self.state.write().await;

        if !state.steps.contains_key(&step_id) {
            return Err(
                StoreError::new(StoreErrorKind::StepNotFound(step_id.to_string())).into(),
            );
        }

        let artifact = ArtifactVersion::new(step_id, payload);
        state
            .step_artifacts
            .entry(step_id)
            .or_default()
            .push(artifact.id);
        state.artifacts.insert(artifact.id, artifact.clone());

        self.backend.put_artifact(&artifact).await?;

        tracing::info!(
            step = %step_id,
            artifact = %artifact.id,
            kind = %artifact.payload.kind,
            "Appended artifact version"
        );
        Ok(artifact)
    }

    /// Look up a container by id. Does not filter soft-deleted records.
    pub async fn container(&self, id: Uuid) -> Option<Container> {
        self.state.read().await.containers.get(&id).cloned()
    }

    /// Look up a step by id. Does not filter soft-deleted containers.
    pub async fn step(&self, id: Uuid) -> Option<GenerationStep> {
        self.state.read().await.steps.get(&id).cloned()
    }

    /// Look up an artifact version by id. Does not filter soft-deleted
    /// records; regeneration needs to find deleted sources.
    pub async fn artifact(&self, id: Uuid) -> Option<ArtifactVersion> {
        self.state.read().await.artifacts.get(&id).cloned()
    }

    /// List containers in creation order, filtering soft-deleted ones by
    /// default.
    pub async fn list_containers(&self, include_deleted: bool) -> Vec<Container> {
        let state = self.state.read().await;
        state
            .container_order
            .iter()
            .filter_map(|id| state.containers.get(id))
            .filter(|c| include_deleted || !c.deleted)
            .cloned()
            .collect()
    }

    /// List a container's steps, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ContainerNotFound` if the container is unknown, or hidden
    /// by soft-delete and `include_deleted` is false.
    pub async fn list_steps(
        &self,
        container_id: Uuid,
        include_deleted: bool,
    ) -> AtelierResult<Vec<GenerationStep>> {
        let state = self.state.read().await;
        let container = state
            .containers
            .get(&container_id)
            .filter(|c| include_deleted || !c.deleted)
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::ContainerNotFound(container_id.to_string()))
            })?;

        let step_ids = state
            .container_steps
            .get(&container.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(step_ids
            .iter()
            .rev()
            .filter_map(|id| state.steps.get(id))
            .cloned()
            .collect())
    }

    /// List a container's artifact versions joined across all steps,
    /// newest step first, append order within a step. Soft-deleted
    /// artifacts are filtered unless `include_deleted` is set.
    ///
    /// # Errors
    ///
    /// Returns `ContainerNotFound` if the container is unknown, or hidden
    /// by soft-delete and `include_deleted` is false.
    pub async fn list_artifacts(
        &self,
        container_id: Uuid,
        include_deleted: bool,
    ) -> AtelierResult<Vec<ArtifactVersion>> {
        let state = self.state.read().await;
        let container = state
            .containers
            .get(&container_id)
            .filter(|c| include_deleted || !c.deleted)
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::ContainerNotFound(container_id.to_string()))
            })?;

        let step_ids = state
            .container_steps
            .get(&container.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut results = Vec::new();
        for step_id in step_ids.iter().rev() {
            let artifact_ids = state
                .step_artifacts
                .get(step_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            results.extend(
                artifact_ids
                    .iter()
                    .filter_map(|id| state.artifacts.get(id))
                    .filter(|a| include_deleted || !a.deleted)
                    .cloned(),
            );
        }
        Ok(results)
    }

    /// Set or clear an artifact's selected flag. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactNotFound` on an unknown id.
    #[tracing::instrument(skip(self))]
    pub async fn set_selected(&self, artifact_id: Uuid, selected: bool) -> AtelierResult<()> {
        self.update_artifact(artifact_id, |artifact| {
            if artifact.selected == selected {
                return false;
            }
            artifact.selected = selected;
            true
        })
        .await
    }

    /// Set or clear an artifact's pinned flag. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactNotFound` on an unknown id.
    #[tracing::instrument(skip(self))]
    pub async fn set_pinned(&self, artifact_id: Uuid, pinned: bool) -> AtelierResult<()> {
        self.update_artifact(artifact_id, |artifact| {
            if artifact.pinned == pinned {
                return false;
            }
            artifact.pinned = pinned;
            true
        })
        .await
    }

    /// Soft-delete an artifact version. Idempotent; sibling versions and
    /// step sequence numbers are untouched.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactNotFound` on an unknown id.
    #[tracing::instrument(skip(self))]
    pub async fn soft_delete_artifact(&self, artifact_id: Uuid) -> AtelierResult<()> {
        self.update_artifact(artifact_id, |artifact| {
            if artifact.deleted {
                return false;
            }
            artifact.deleted = true;
            true
        })
        .await
    }

    /// Soft-delete a container. Idempotent; steps and artifacts stay in
    /// the backing store and reappear in `include_deleted` listings.
    ///
    /// # Errors
    ///
    /// Returns `ContainerNotFound` on an unknown id.
    #[tracing::instrument(skip(self))]
    pub async fn soft_delete_container(&self, container_id: Uuid) -> AtelierResult<()> {
        let mut state = self.state.write().await;
        let container = state.containers.get_mut(&container_id).ok_or_else(|| {
            StoreError::new(StoreErrorKind::ContainerNotFound(container_id.to_string()))
        })?;

        if container.deleted {
            return Ok(());
        }
        container.deleted = true;
        let container = container.clone();

        self.backend.put_container(&container).await?;

        tracing::info!(container = %container_id, "Soft-deleted container");
        Ok(())
    }

    /// Export the full model, including soft-deleted records, with
    /// ordering and flags preserved verbatim.
    pub async fn export_snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;

        let containers: Vec<Container> = state
            .container_order
            .iter()
            .filter_map(|id| state.containers.get(id))
            .cloned()
            .collect();

        let mut steps = Vec::new();
        let mut artifacts = Vec::new();
        for container in &containers {
            let step_ids = state
                .container_steps
                .get(&container.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for step_id in step_ids {
                if let Some(step) = state.steps.get(step_id) {
                    steps.push(step.clone());
                }
                let artifact_ids = state
                    .step_artifacts
                    .get(step_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                artifacts.extend(
                    artifact_ids
                        .iter()
                        .filter_map(|id| state.artifacts.get(id))
                        .cloned(),
                );
            }
        }

        StoreSnapshot {
            containers,
            steps,
            artifacts,
        }
    }

    /// Apply a flag mutation to an artifact and write it through when the
    /// record actually changed.
    async fn update_artifact(
        &self,
        artifact_id: Uuid,
        apply: impl FnOnce(&mut ArtifactVersion) -> bool,
    ) -> AtelierResult<()> {
        let mut state = self.state.write().await;
        let artifact = state.artifacts.get_mut(&artifact_id).ok_or_else(|| {
            StoreError::new(StoreErrorKind::ArtifactNotFound(artifact_id.to_string()))
        })?;

        if !apply(&mut *artifact) {
            return Ok(());
        }
        let artifact = artifact.clone();

        self.backend.put_artifact(&artifact).await?;
        Ok(())
    }
}
