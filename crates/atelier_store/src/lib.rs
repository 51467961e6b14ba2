//! Versioned, append-only artifact store for Atelier.
//!
//! This crate owns the persistent data model: containers, their ordered
//! generation steps, and the artifact versions each step produced. State is
//! held in memory behind a single lock and written through to a pluggable
//! [`StoreBackend`](atelier_interface::StoreBackend) after every mutation.
//!
//! # Guarantees
//!
//! - **Monotonic sequences**: step sequence numbers are assigned atomically
//!   under the store lock; strictly increasing per container, never reused.
//! - **Append-only versions**: regeneration appends new artifact versions;
//!   existing versions are never mutated or renumbered.
//! - **Soft delete**: delete flags hide records from default listings but
//!   never remove them from the backing store.
//!
//! # Example
//!
//! ```rust
//! use atelier_core::GenerationRequest;
//! use atelier_store::{ArtifactStore, MemoryBackend};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ArtifactStore::new(Arc::new(MemoryBackend::new()));
//!
//! let container = store.create_container("storyboard").await?;
//! let request = GenerationRequest::builder()
//!     .prompt("a cat".to_string())
//!     .build()?;
//! let step = store.create_step(container.id, request).await?;
//! assert_eq!(step.sequence, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod store;

pub use filesystem::FileBackend;
pub use memory::MemoryBackend;
pub use store::ArtifactStore;
