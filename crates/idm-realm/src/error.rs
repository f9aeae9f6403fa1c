//! Realm aggregate error types.

use thiserror::Error;

use idm_credential::CredentialError;
use idm_crypto::CryptoError;
use idm_store::StoreError;

/// Errors surfaced by realm aggregate operations.
///
/// Read paths report absence as `Ok(None)`, never as an error; create
/// paths fail typed on duplicates. Storage failures pass through
/// unwrapped.
#[derive(Debug, Error)]
pub enum RealmError {
    /// A create hit an existing entity with the same unique name.
    #[error("{entity} '{name}' already exists in this realm")]
    AlreadyExists {
        /// Entity kind ("user", "role").
        entity: &'static str,
        /// The conflicting name.
        name: String,
    },

    /// A role referenced by name does not exist in this realm.
    #[error("role '{0}' not found in this realm")]
    RoleNotFound(String),

    /// No built-in template exists for the credential type.
    #[error("unknown credential type '{0}'")]
    UnknownCredentialType(String),

    /// A record that must be persisted has no object identifier.
    #[error("{0} record is not persisted")]
    NotPersisted(&'static str),

    /// Key material decode/encode failure. Fatal, not retried.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Persistence port failure. Propagated, not retried or wrapped.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Credential delegate failure.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Result type for realm aggregate operations.
pub type RealmResult<T> = Result<T, RealmError>;
