//! Generation provider error types.

/// Specific error conditions raised by or around a generation provider.
///
/// The provider's own failure taxonomy is opaque to the orchestration core;
/// every variant here is presented to the user as retryable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Provider cannot be constructed without a credential
    #[display("Missing credential: {}", _0)]
    MissingCredential(String),
    /// Provider could not be reached or refused the request
    #[display("Provider unavailable: {}", _0)]
    Unavailable(String),
    /// The generation call itself failed
    #[display("Generation failed: {}", _0)]
    Generation(String),
    /// The generated artifact failed a post-generation check
    #[display("Generated artifact rejected: {}", _0)]
    Validation(String),
}

/// Error type for generation provider operations.
///
/// # Examples
///
/// ```
/// use atelier_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Generation("timeout".to_string()));
/// assert!(format!("{}", err).contains("Generation failed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The specific error condition
    pub kind: ProviderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
