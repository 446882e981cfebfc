//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, StorageError};

/// Every error a Coffer operation can produce.
///
/// # Examples
///
/// ```
/// use coffer_error::{CofferError, ConfigError};
///
/// let err: CofferError = ConfigError::new("Missing connection string").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CofferErrorKind {
    /// Storage error raised by a backend or the repository
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Opaque failure reported by an external backend client
    #[from(BackendError)]
    Backend(BackendError),
}

/// Coffer error with kind discrimination.
///
/// # Examples
///
/// ```
/// use coffer_error::{CofferErrorKind, CofferResult, StorageError, StorageErrorKind};
///
/// fn might_fail() -> CofferResult<()> {
///     Err(StorageError::new(StorageErrorKind::Unavailable("storage root missing".into())))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), CofferErrorKind::Storage(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Coffer Error: {}", _0)]
pub struct CofferError(Box<CofferErrorKind>);

impl CofferError {
    /// Create a new error from a kind.
    pub fn new(kind: CofferErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CofferErrorKind {
        &self.0
    }

    /// Storage error kind, if this is a storage error.
    pub fn storage_kind(&self) -> Option<&crate::StorageErrorKind> {
        match self.kind() {
            CofferErrorKind::Storage(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// Whether this error reports a missing object or container.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.storage_kind(),
            Some(crate::StorageErrorKind::NotFound(_))
                | Some(crate::StorageErrorKind::ContainerNotFound(_))
        )
    }
}

// Generic From implementation for any type that converts to CofferErrorKind
impl<T> From<T> for CofferError
where
    T: Into<CofferErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Coffer operations.
pub type CofferResult<T> = std::result::Result<T, CofferError>;
