//! Atelier - batch orchestration for AI-generated artifacts.
//!
//! Atelier fires N independent generation requests against an external
//! provider, tracks each as its own slot state machine, merges successes
//! into a versioned, append-only store as they arrive, and lets the user
//! retry failed slots or regenerate accepted artifacts without disturbing
//! siblings or losing history.
//!
//! # Features
//!
//! - **Batch generation**: N concurrent provider calls per step, observed
//!   incrementally; the slowest or failing call never blocks the rest
//! - **Versioned store**: containers hold ordered generation steps, steps
//!   accumulate artifact versions; soft-delete, selection, and pin flags
//! - **Retry and regenerate**: one shared single-slot pipeline re-issues a
//!   failed slot with its captured prompt or appends a fresh version next
//!   to an accepted artifact
//! - **Durable backends**: write-through persistence to an in-memory or
//!   filesystem document store
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use atelier::{
//!     ArtifactStore, BatchEvent, BatchOrchestrator, FileBackend, GenerationRequest,
//!     StaticDriverSource,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(FileBackend::new("./data")?);
//!     let store = Arc::new(ArtifactStore::load(backend).await?);
//!     let drivers = Arc::new(StaticDriverSource::new(my_driver));
//!     let orchestrator = BatchOrchestrator::new(drivers, Arc::clone(&store));
//!
//!     let container = store.create_container("storyboard").await?;
//!     let request = GenerationRequest::builder()
//!         .prompt("a cat in a hat".to_string())
//!         .build()?;
//!     let step = store.create_step(container.id, request.clone()).await?;
//!
//!     let mut handle = orchestrator.run_batch(&step, request, 4).await?;
//!     while let Some(event) = handle.recv().await {
//!         match event {
//!             BatchEvent::Slot { index, state, .. } => println!("{index}: {state:?}"),
//!             BatchEvent::Settled { summary } => println!("settled: {summary:?}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Atelier is organized as a workspace with focused crates:
//!
//! - `atelier_core` - Core data types (containers, steps, versions, slots)
//! - `atelier_interface` - Driver, validator, and backend traits
//! - `atelier_error` - Error types
//! - `atelier_store` - Versioned artifact store and backends
//! - `atelier_batch` - Slot orchestration and retry/regenerate control
//!
//! This crate (`atelier`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use atelier_batch::{
    BatchEvent, BatchHandle, BatchOrchestrator, BatchOutcome, OrchestratorConfig, SlotHandle,
    StaticDriverSource,
};
pub use atelier_core::{
    ArtifactPayload, ArtifactVersion, BatchSummary, Container, GenerationRequest,
    GenerationRequestBuilder, GenerationStep, MediaKind, MediaSource, Slot, SlotState,
    StoreSnapshot, init_telemetry,
};
pub use atelier_error::{
    AtelierError, AtelierErrorKind, AtelierResult, BatchError, BatchErrorKind, ConfigError,
    ProviderError, ProviderErrorKind, StoreError, StoreErrorKind,
};
pub use atelier_interface::{ArtifactValidator, DriverSource, GenerationDriver, StoreBackend};
pub use atelier_store::{ArtifactStore, FileBackend, MemoryBackend};
