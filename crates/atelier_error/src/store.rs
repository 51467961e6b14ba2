//! Artifact store error types.

/// Specific error conditions for artifact store operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Container id is unknown or hidden by soft-delete
    #[display("Container {} not found", _0)]
    ContainerNotFound(String),
    /// Step id is unknown
    #[display("Step {} not found", _0)]
    StepNotFound(String),
    /// Artifact id is unknown
    #[display("Artifact {} not found", _0)]
    ArtifactNotFound(String),
    /// Record references broke an internal invariant
    #[display("Invalid store state: {}", _0)]
    InvalidState(String),
    /// Failed to encode or decode a record document
    #[display("Serialization error: {}", _0)]
    Serialization(String),
    /// Failed to create a backend directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a record document
    #[display("Failed to write record: {}", _0)]
    FileWrite(String),
    /// Failed to read a record document
    #[display("Failed to read record: {}", _0)]
    FileRead(String),
}

/// Error type for artifact store operations.
///
/// # Examples
///
/// ```
/// use atelier_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::StepNotFound("abc".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The specific error condition
    pub kind: StoreErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoreError {
    /// Create a new StoreError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
