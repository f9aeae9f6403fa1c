//! Password credential handler backed by Argon2id.
//!
//! Hashes are stored in PHC string format on the user's stored
//! credential record. Verification uses constant-time comparison.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use idm_model::credential::fields;
use idm_model::{CredentialKind, StoredCredentialRecord, UserRecord};
use idm_store::{Criteria, DocumentStore};

use crate::error::{CredentialError, CredentialResult};
use crate::handler::{CredentialHandler, CredentialStatus};

/// Metadata stored alongside password hashes.
const PASSWORD_CREDENTIAL_DATA: &str = r#"{"algorithm":"argon2id"}"#;

/// Password hashing configuration.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism factor.
    pub parallelism: u32,
    /// Output hash length.
    pub hash_length: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        // OWASP recommended settings for Argon2id
        Self {
            memory_cost: 19 * 1024, // 19 MiB
            time_cost: 2,
            parallelism: 1,
            hash_length: 32,
        }
    }
}

impl PasswordPolicy {
    /// Creates a policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the memory cost in KiB.
    #[must_use]
    pub const fn memory_cost(mut self, kib: u32) -> Self {
        self.memory_cost = kib;
        self
    }

    /// Sets the time cost (iterations).
    #[must_use]
    pub const fn time_cost(mut self, iterations: u32) -> Self {
        self.time_cost = iterations;
        self
    }

    /// Sets the parallelism factor.
    #[must_use]
    pub const fn parallelism(mut self, p: u32) -> Self {
        self.parallelism = p;
        self
    }

    fn build_params(&self) -> Result<Params, argon2::Error> {
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.hash_length as usize),
        )
    }
}

/// Password strategy: Argon2id over stored credential records.
pub struct PasswordCredentialHandler {
    policy: PasswordPolicy,
}

impl PasswordCredentialHandler {
    /// Creates a handler with the given policy.
    #[must_use]
    pub const fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Creates a handler with the default policy.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PasswordPolicy::default())
    }

    fn hash(&self, password: &str) -> CredentialResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let params = self
            .policy
            .build_params()
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    async fn stored_password<S: DocumentStore>(
        &self,
        store: &S,
        user_id: uuid::Uuid,
    ) -> CredentialResult<Option<StoredCredentialRecord>> {
        let found = store
            .find_one(
                Criteria::new()
                    .eq(fields::USER_ID, user_id)
                    .eq(fields::CREDENTIAL_TYPE, CredentialKind::Password.as_str()),
            )
            .await?;
        Ok(found)
    }
}

impl Default for PasswordCredentialHandler {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl<S: DocumentStore> CredentialHandler<S> for PasswordCredentialHandler {
    async fn validate(
        &self,
        store: &S,
        user: &UserRecord,
        supplied: &str,
    ) -> CredentialResult<CredentialStatus> {
        let user_id = user.oid.ok_or(CredentialError::DetachedUser)?;
        let Some(stored) = self.stored_password(store, user_id).await? else {
            return Ok(CredentialStatus::Invalid);
        };

        let parsed = PasswordHash::new(&stored.secret_data)
            .map_err(|e| CredentialError::InvalidHash(e.to_string()))?;

        // Argon2::default() can verify any Argon2 variant
        match Argon2::default().verify_password(supplied.as_bytes(), &parsed) {
            Ok(()) => Ok(CredentialStatus::Valid),
            Err(_) => Ok(CredentialStatus::Invalid),
        }
    }

    async fn update(
        &self,
        store: &S,
        user: &UserRecord,
        new_value: &str,
        _device: Option<&str>,
        _label: Option<&str>,
    ) -> CredentialResult<()> {
        let user_id = user.oid.ok_or(CredentialError::DetachedUser)?;
        let hash = self.hash(new_value)?;

        match self.stored_password(store, user_id).await? {
            Some(mut existing) => {
                existing.secret_data = hash;
                store.save(&mut existing).await?;
            }
            None => {
                let mut record = StoredCredentialRecord::new(
                    user_id,
                    CredentialKind::Password.as_str(),
                    hash,
                    PASSWORD_CREDENTIAL_DATA,
                );
                store.save(&mut record).await?;
            }
        }
        Ok(())
    }
}
