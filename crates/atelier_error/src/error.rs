//! Top-level error wrapper types.

use crate::{BatchError, ConfigError, ProviderError, StoreError};

/// This is the foundation error enum. Additional variants will be added
/// by other atelier crates as the workspace grows.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierError, ConfigError};
///
/// let cfg_err = ConfigError::new("bad toml");
/// let err: AtelierError = cfg_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AtelierErrorKind {
    /// Artifact store error
    #[from(StoreError)]
    Store(StoreError),
    /// Generation provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Batch orchestration error
    #[from(BatchError)]
    Batch(BatchError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Atelier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, StoreError, StoreErrorKind};
///
/// fn might_fail() -> AtelierResult<()> {
///     Err(StoreError::new(StoreErrorKind::InvalidState("oops".into())))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Atelier Error: {}", _0)]
pub struct AtelierError(Box<AtelierErrorKind>);

impl AtelierError {
    /// Create a new error from a kind.
    pub fn new(kind: AtelierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AtelierErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AtelierErrorKind
impl<T> From<T> for AtelierError
where
    T: Into<AtelierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Atelier operations.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, ProviderError, ProviderErrorKind};
///
/// fn generate() -> AtelierResult<String> {
///     Err(ProviderError::new(ProviderErrorKind::Unavailable("503".into())))?
/// }
/// ```
pub type AtelierResult<T> = std::result::Result<T, AtelierError>;
