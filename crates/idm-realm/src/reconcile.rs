//! Required-credential set reconciliation.
//!
//! A pure delta between the stored declarations for one (realm, client
//! category) pair and the desired type set. The manager applies
//! deletions before creations; the batch is not atomic, so a failure
//! partway leaves a mixed state. That is contract, not accident.

use std::collections::HashSet;

use idm_model::RequiredCredentialRecord;

/// The add/remove delta computed by [`diff`].
#[derive(Debug, Clone)]
pub struct CredentialDelta {
    /// Stored declarations whose type is no longer desired.
    pub to_delete: Vec<RequiredCredentialRecord>,
    /// Desired types with no stored declaration yet.
    pub to_create: Vec<String>,
}

impl CredentialDelta {
    /// True when the stored set already equals the desired set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_create.is_empty()
    }
}

/// Computes the delta between stored declarations and a desired type
/// set.
///
/// Duplicate stored declarations of an undesired type are all slated
/// for deletion; desired types are created at most once.
#[must_use]
pub fn diff(current: &[RequiredCredentialRecord], desired: &HashSet<String>) -> CredentialDelta {
    let to_delete: Vec<RequiredCredentialRecord> = current
        .iter()
        .filter(|record| !desired.contains(&record.credential_type))
        .cloned()
        .collect();

    let present: HashSet<&str> = current
        .iter()
        .map(|record| record.credential_type.as_str())
        .collect();

    let mut to_create: Vec<String> = desired
        .iter()
        .filter(|credential_type| !present.contains(credential_type.as_str()))
        .cloned()
        .collect();
    // Deterministic application order.
    to_create.sort();

    CredentialDelta {
        to_delete,
        to_create,
    }
}
