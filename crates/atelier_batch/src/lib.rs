//! Slot orchestration for batch generation requests.
//!
//! This crate turns one user action into N independent provider calls,
//! tracks each call as its own slot state machine, merges successes into
//! the artifact store as they arrive, and lets the caller retry a failed
//! slot or regenerate an accepted artifact without disturbing siblings.
//!
//! The same single-slot pipeline backs initial batches, retries, and
//! regenerations; image and video requests flow through identical code.
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_batch::{BatchEvent, BatchOrchestrator, StaticDriverSource};
//!
//! let orchestrator = BatchOrchestrator::new(drivers, store);
//! let mut handle = orchestrator.run_batch(&step, request, 4).await?;
//!
//! while let Some(event) = handle.recv().await {
//!     match event {
//!         BatchEvent::Slot { index, state, .. } => render_slot(index, state),
//!         BatchEvent::Settled { summary } => refresh_balance(summary),
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod controller;
mod events;
mod orchestrator;
mod source;

pub use config::OrchestratorConfig;
pub use events::{BatchEvent, BatchHandle, BatchOutcome, SlotHandle};
pub use orchestrator::BatchOrchestrator;
pub use source::StaticDriverSource;
