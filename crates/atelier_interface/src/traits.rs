//! Trait definitions for generation providers and durable backends.

use async_trait::async_trait;
use atelier_core::{
    ArtifactPayload, ArtifactVersion, Container, GenerationRequest, GenerationStep, StoreSnapshot,
};
use atelier_error::AtelierResult;
use std::sync::Arc;

/// Core trait that all generation providers must implement.
///
/// This is the minimal interface for one asynchronous generation call.
/// The provider's latency and failure taxonomy are opaque to the
/// orchestration core; any failure is treated uniformly as retryable.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate one artifact for the captured request.
    async fn generate(&self, request: &GenerationRequest) -> AtelierResult<ArtifactPayload>;

    /// Provider name (e.g., "gemini", "openai", "stub").
    fn provider_name(&self) -> &'static str;

    /// Model identifier the driver will use when the request names none.
    fn model_name(&self) -> &str;
}

/// Fallible driver acquisition.
///
/// Constructing a provider can fail before any call is issued (missing
/// credential, absent capability). The orchestrator acquires its driver
/// through this trait at the top of every batch, so such failures surface
/// as a single batch-level precondition error rather than N slot errors.
pub trait DriverSource: Send + Sync {
    /// Acquire a ready-to-use driver, or fail the whole batch up front.
    fn acquire(&self) -> AtelierResult<Arc<dyn GenerationDriver>>;
}

/// Post-generation check applied before an artifact is persisted.
///
/// A rejection is treated like a provider failure: the slot becomes an
/// error with the validator's message and nothing is written to the store.
#[async_trait]
pub trait ArtifactValidator: Send + Sync {
    /// Accept or reject a generated payload.
    async fn validate(
        &self,
        request: &GenerationRequest,
        payload: &ArtifactPayload,
    ) -> AtelierResult<()>;
}

/// Durable document store backing the artifact store.
///
/// Implementations persist one document per record and are free to choose
/// their encoding and layout. Writes are upserts; flag changes and
/// soft-deletes arrive as repeated puts of the same record id. No
/// transaction spanning multiple containers is ever required.
#[async_trait]
pub trait StoreBackend: Send + Sync + std::fmt::Debug {
    /// Persist (or overwrite) a container record.
    async fn put_container(&self, container: &Container) -> AtelierResult<()>;

    /// Persist (or overwrite) a step record.
    async fn put_step(&self, step: &GenerationStep) -> AtelierResult<()>;

    /// Persist (or overwrite) an artifact version record.
    async fn put_artifact(&self, artifact: &ArtifactVersion) -> AtelierResult<()>;

    /// Load everything the backend holds, for session restore.
    async fn load_snapshot(&self) -> AtelierResult<StoreSnapshot>;
}
