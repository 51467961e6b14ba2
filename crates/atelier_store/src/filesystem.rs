//! Filesystem-backed document store.
//!
//! Stores one JSON document per record under a simple directory layout:
//!
//! ```text
//! {base_path}/
//! ├── containers/
//! │   └── {container_id}.json
//! ├── steps/
//! │   └── {step_id}.json
//! └── artifacts/
//!     └── {artifact_id}.json
//! ```
//!
//! Writes are upserts using a temp file + rename for atomicity.

use async_trait::async_trait;
use atelier_core::{ArtifactVersion, Container, GenerationStep, StoreSnapshot};
use atelier_error::{AtelierResult, StoreError, StoreErrorKind};
use atelier_interface::StoreBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const CONTAINERS_DIR: &str = "containers";
const STEPS_DIR: &str = "steps";
const ARTIFACTS_DIR: &str = "artifacts";

/// Filesystem backend writing one JSON document per record.
#[derive(Debug)]
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    /// Create a new filesystem backend.
    ///
    /// Creates the base directory and record subdirectories if they don't
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns error if a directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> AtelierResult<Self> {
        let base_path = base_path.into();

        for dir in [CONTAINERS_DIR, STEPS_DIR, ARTIFACTS_DIR] {
            let path = base_path.join(dir);
            std::fs::create_dir_all(&path).map_err(|e| {
                StoreError::new(StoreErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
        }

        tracing::info!(path = %base_path.display(), "Created filesystem store backend");
        Ok(Self { base_path })
    }

    fn record_path(&self, dir: &str, id: Uuid) -> PathBuf {
        self.base_path.join(dir).join(format!("{}.json", id))
    }

    /// Write a record document atomically (temp file, then rename).
    async fn write_document<T: Serialize>(
        &self,
        dir: &str,
        id: Uuid,
        record: &T,
    ) -> AtelierResult<()> {
        let path = self.record_path(dir, id);

        let data = serde_json::to_vec_pretty(record).map_err(|e| {
            StoreError::new(StoreErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &data).await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), size = data.len(), "Wrote record document");
        Ok(())
    }

    /// Read every JSON document in a record directory.
    async fn read_documents<T: DeserializeOwned>(&self, dir: &str) -> AtelierResult<Vec<T>> {
        let dir_path = self.base_path.join(dir);
        let mut entries = tokio::fs::read_dir(&dir_path).await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileRead(format!(
                "{}: {}",
                dir_path.display(),
                e
            )))
        })?;

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileRead(format!(
                "{}: {}",
                dir_path.display(),
                e
            )))
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            records.push(Self::read_document(&path).await?);
        }
        Ok(records)
    }

    async fn read_document<T: DeserializeOwned>(path: &Path) -> AtelierResult<T> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::new(StoreErrorKind::FileRead(format!(
                    "{}: not found",
                    path.display()
                )))
            } else {
                StoreError::new(StoreErrorKind::FileRead(format!("{}: {}", path.display(), e)))
            }
        })?;

        serde_json::from_slice(&data).map_err(|e| {
            StoreError::new(StoreErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()
        })
    }
}

#[async_trait]
impl StoreBackend for FileBackend {
    #[tracing::instrument(skip(self, container), fields(container = %container.id))]
    async fn put_container(&self, container: &Container) -> AtelierResult<()> {
        self.write_document(CONTAINERS_DIR, container.id, container)
            .await
    }

    #[tracing::instrument(skip(self, step), fields(step = %step.id))]
    async fn put_step(&self, step: &GenerationStep) -> AtelierResult<()> {
        self.write_document(STEPS_DIR, step.id, step).await
    }

    #[tracing::instrument(skip(self, artifact), fields(artifact = %artifact.id))]
    async fn put_artifact(&self, artifact: &ArtifactVersion) -> AtelierResult<()> {
        self.write_document(ARTIFACTS_DIR, artifact.id, artifact).await
    }

    #[tracing::instrument(skip(self))]
    async fn load_snapshot(&self) -> AtelierResult<StoreSnapshot> {
        let mut containers: Vec<Container> = self.read_documents(CONTAINERS_DIR).await?;
        let mut steps: Vec<GenerationStep> = self.read_documents(STEPS_DIR).await?;
        let mut artifacts: Vec<ArtifactVersion> = self.read_documents(ARTIFACTS_DIR).await?;

        // Directory iteration order is arbitrary; restore the orders the
        // store expects. Within a step, creation time is append order.
        containers.sort_by_key(|c| (c.created_at, c.id));
        steps.sort_by_key(|s| (s.container_id, s.sequence));
        artifacts.sort_by_key(|a| (a.created_at, a.id));

        tracing::info!(
            containers = containers.len(),
            steps = steps.len(),
            artifacts = artifacts.len(),
            "Loaded snapshot from filesystem"
        );

        Ok(StoreSnapshot {
            containers,
            steps,
            artifacts,
        })
    }
}
