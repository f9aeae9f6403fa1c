//! Credential handler error types.

use std::fmt;

use idm_store::StoreError;

/// Errors from credential validation and update.
#[derive(Debug)]
pub enum CredentialError {
    /// The user record has no object identifier (never saved).
    DetachedUser,
    /// A stored hash could not be parsed.
    InvalidHash(String),
    /// Hashing a new credential value failed.
    Hashing(String),
    /// Persistence failure while reading or writing credentials.
    Store(StoreError),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DetachedUser => write!(f, "user record is not persisted"),
            Self::InvalidHash(msg) => write!(f, "stored credential hash is invalid: {msg}"),
            Self::Hashing(msg) => write!(f, "credential hashing failed: {msg}"),
            Self::Store(err) => write!(f, "credential storage failed: {err}"),
        }
    }
}

impl std::error::Error for CredentialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;
