//! Membership checks over identifier lists.
//!
//! All checks are linear scans over the lists already loaded onto the
//! records. Realm sizes keep these lists short; if that changes, this
//! module is the place to add an indexed representation.

use std::collections::HashSet;

use uuid::Uuid;

use idm_model::RoleRecord;

/// Exact membership test over a held-identifier list.
#[must_use]
pub fn holds(held: &[Uuid], candidate: Uuid) -> bool {
    held.iter().any(|id| *id == candidate)
}

/// Names of the given roles that belong to the given realm.
///
/// Roles owned by another realm are dropped, so a tampered identifier
/// list cannot leak names across the realm boundary.
#[must_use]
pub fn realm_role_names(roles: &[RoleRecord], realm_oid: Uuid) -> HashSet<String> {
    roles
        .iter()
        .filter(|role| role.realm_id == realm_oid)
        .map(|role| role.name.clone())
        .collect()
}
