//! Core data types for the Atelier generation library.
//!
//! This crate provides the foundation data types used across all Atelier interfaces:
//! the persisted model (containers, generation steps, artifact versions), the
//! ephemeral batch model (slots and their states), and the captured generation
//! request that travels with every provider call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod container;
mod media;
mod request;
mod slot;
mod snapshot;
mod step;
mod telemetry;

pub use artifact::ArtifactVersion;
pub use container::Container;
pub use media::{ArtifactPayload, MediaKind, MediaSource};
pub use request::{GenerationRequest, GenerationRequestBuilder};
pub use slot::{BatchSummary, Slot, SlotState};
pub use snapshot::StoreSnapshot;
pub use step::GenerationStep;
pub use telemetry::init_telemetry;
