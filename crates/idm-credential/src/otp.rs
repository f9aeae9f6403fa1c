//! One-time-password credential handler stub.

use async_trait::async_trait;
use idm_model::UserRecord;
use idm_store::DocumentStore;

use crate::error::CredentialResult;
use crate::handler::{CredentialHandler, CredentialStatus};

/// One-time-password strategy.
///
/// OTP validation is not implemented in this revision: `validate`
/// always reports [`CredentialStatus::Invalid`] so a caller can never
/// authenticate through the unfinished path. `update` accepts and
/// discards the secret.
pub struct OtpCredentialHandler;

#[async_trait]
impl<S: DocumentStore> CredentialHandler<S> for OtpCredentialHandler {
    async fn validate(
        &self,
        _store: &S,
        _user: &UserRecord,
        _supplied: &str,
    ) -> CredentialResult<CredentialStatus> {
        // Unimplemented: fail closed rather than pass silently.
        Ok(CredentialStatus::Invalid)
    }

    async fn update(
        &self,
        _store: &S,
        _user: &UserRecord,
        _new_value: &str,
        _device: Option<&str>,
        _label: Option<&str>,
    ) -> CredentialResult<()> {
        Ok(())
    }
}
