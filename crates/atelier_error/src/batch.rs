//! Batch orchestration error types.

/// Specific error conditions for batch orchestration.
///
/// Per-slot failures never appear here; they are recovered locally and
/// surfaced as slot state. This enum covers failures that abort an
/// operation before any slot is issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BatchErrorKind {
    /// A batch-level precondition failed before any slot was issued
    #[display("Batch precondition failed: {}", _0)]
    Precondition(String),
    /// The settlement signal was dropped before the batch resolved
    #[display("Batch interrupted: {}", _0)]
    Interrupted(String),
}

/// Error type for batch orchestration.
///
/// # Examples
///
/// ```
/// use atelier_error::{BatchError, BatchErrorKind};
///
/// let err = BatchError::new(BatchErrorKind::Precondition("no driver".to_string()));
/// assert!(format!("{}", err).contains("precondition"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Batch Error: {} at line {} in {}", kind, line, file)]
pub struct BatchError {
    /// The specific error condition
    pub kind: BatchErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl BatchError {
    /// Create a new BatchError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
