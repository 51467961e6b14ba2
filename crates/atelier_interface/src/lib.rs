//! Capability traits for the Atelier generation library.
//!
//! This crate defines the seams between the orchestration core and its
//! external collaborators: the generation provider, post-generation
//! validation, and the durable store backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ArtifactValidator, DriverSource, GenerationDriver, StoreBackend};
