//! The credential handler contract and the injected handler bundle.

use std::sync::Arc;

use async_trait::async_trait;
use idm_model::UserRecord;
use idm_store::DocumentStore;

use crate::error::CredentialResult;
use crate::otp::OtpCredentialHandler;
use crate::password::PasswordCredentialHandler;

/// Outcome of a credential validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// The supplied credential matches.
    Valid,
    /// The supplied credential does not match (or none is stored).
    Invalid,
}

/// A per-credential-type validation/update strategy.
///
/// Handlers read and write their own stored credential records through
/// the persistence port they are handed; the aggregate manager never
/// touches credential material itself.
#[async_trait]
pub trait CredentialHandler<S: DocumentStore>: Send + Sync {
    /// Validates a supplied secret against the user's stored credential.
    ///
    /// A user without a stored credential of this type is `Invalid`,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure or corrupt stored material.
    async fn validate(
        &self,
        store: &S,
        user: &UserRecord,
        supplied: &str,
    ) -> CredentialResult<CredentialStatus>;

    /// Replaces the user's stored credential with a new value.
    ///
    /// `device` and `label` carry type-specific extras (e.g. an OTP
    /// device name); handlers ignore what they do not use.
    ///
    /// # Errors
    ///
    /// Returns an error on storage or hashing failure.
    async fn update(
        &self,
        store: &S,
        user: &UserRecord,
        new_value: &str,
        device: Option<&str>,
        label: Option<&str>,
    ) -> CredentialResult<()>;
}

/// The handler bundle injected into a realm aggregate manager.
///
/// One slot per delegated credential type. Constructed explicitly;
/// there are no process-global handler singletons.
pub struct CredentialHandlers<S: DocumentStore> {
    /// Password strategy.
    pub password: Arc<dyn CredentialHandler<S>>,
    /// One-time-password strategy.
    pub otp: Arc<dyn CredentialHandler<S>>,
}

impl<S: DocumentStore> CredentialHandlers<S> {
    /// Bundles explicit handler instances.
    #[must_use]
    pub fn new(password: Arc<dyn CredentialHandler<S>>, otp: Arc<dyn CredentialHandler<S>>) -> Self {
        Self { password, otp }
    }

    /// The stock bundle: Argon2id passwords, OTP stub.
    #[must_use]
    pub fn default_stack() -> Self {
        Self {
            password: Arc::new(PasswordCredentialHandler::with_defaults()),
            otp: Arc::new(OtpCredentialHandler),
        }
    }
}

impl<S: DocumentStore> Clone for CredentialHandlers<S> {
    fn clone(&self) -> Self {
        Self {
            password: Arc::clone(&self.password),
            otp: Arc::clone(&self.otp),
        }
    }
}
