//! Error types for the Atelier generation library.
//!
//! This crate provides the foundation error types used throughout the Atelier ecosystem.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use atelier_error::{AtelierResult, ConfigError};
//!
//! fn load_settings() -> AtelierResult<String> {
//!     Err(ConfigError::new("Missing field"))?
//! }
//!
//! match load_settings() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod provider;
mod store;

pub use batch::{BatchError, BatchErrorKind};
pub use config::ConfigError;
pub use error::{AtelierError, AtelierErrorKind, AtelierResult};
pub use provider::{ProviderError, ProviderErrorKind};
pub use store::{StoreError, StoreErrorKind};
