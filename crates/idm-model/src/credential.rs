//! Supplied and stored credentials.
//!
//! `CredentialInput` is what a caller hands to the aggregate manager
//! when updating a credential; `StoredCredentialRecord` is what the
//! credential handlers persist (hash material, never plaintext).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credential type of a supplied credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    /// Password credential.
    Password,
    /// Time-based one-time password.
    Totp,
    /// Client certificate.
    #[serde(rename = "cert")]
    ClientCert,
    /// Shared secret.
    Secret,
}

impl CredentialKind {
    /// Returns the string representation used in storage, matching the
    /// built-in template keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Totp => "totp",
            Self::ClientCert => "cert",
            Self::Secret => "secret",
        }
    }
}

/// A credential value supplied by a caller for update.
#[derive(Debug, Clone)]
pub struct CredentialInput {
    /// Credential type.
    pub kind: CredentialKind,
    /// Raw credential value (plaintext password, OTP secret, PEM cert).
    pub value: String,
    /// Device label for OTP credentials.
    pub device: Option<String>,
}

impl CredentialInput {
    /// Creates a password input.
    #[must_use]
    pub fn password(value: impl Into<String>) -> Self {
        Self {
            kind: CredentialKind::Password,
            value: value.into(),
            device: None,
        }
    }

    /// Creates a TOTP input with an optional device label.
    #[must_use]
    pub fn totp(value: impl Into<String>, device: Option<String>) -> Self {
        Self {
            kind: CredentialKind::Totp,
            value: value.into(),
            device,
        }
    }
}

/// A persisted credential belonging to a user.
///
/// `secret_data` holds the sensitive material (e.g. a PHC-format hash
/// string); `credential_data` holds non-secret metadata as JSON text.
/// Only credential handlers read or write these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentialRecord {
    /// Store-assigned object identifier (`None` until first save).
    pub oid: Option<Uuid>,
    /// Owning user object identifier.
    pub user_id: Uuid,
    /// Credential type key.
    pub credential_type: String,
    /// Secret material (e.g. PHC hash string).
    pub secret_data: String,
    /// Non-secret metadata, JSON text.
    pub credential_data: String,
    /// When the credential was stored or last replaced.
    pub created_at: DateTime<Utc>,
}

impl StoredCredentialRecord {
    /// Creates a new stored credential.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        credential_type: impl Into<String>,
        secret_data: impl Into<String>,
        credential_data: impl Into<String>,
    ) -> Self {
        Self {
            oid: None,
            user_id,
            credential_type: credential_type.into(),
            secret_data: secret_data.into(),
            credential_data: credential_data.into(),
            created_at: Utc::now(),
        }
    }
}

/// Query field names for stored credential records.
pub mod fields {
    /// Owning user identifier.
    pub const USER_ID: &str = "user_id";
    /// Credential type key.
    pub const CREDENTIAL_TYPE: &str = "credential_type";
}
