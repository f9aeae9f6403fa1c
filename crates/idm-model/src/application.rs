//! Application (OAuth/OIDC client) record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An application registered within a realm.
///
/// Every application is backed by a service-account user that carries
/// its role and scope grants. Creating an application is a compound
/// workflow owned by the realm aggregate manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Store-assigned object identifier (`None` until first save).
    pub oid: Option<Uuid>,
    /// Owning realm object identifier.
    pub realm_id: Uuid,
    /// Application name.
    pub name: String,
    /// Object identifier of the backing service-account user.
    pub service_account_id: Uuid,
    /// When the application was created.
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Creates a new application record.
    #[must_use]
    pub fn new(realm_id: Uuid, name: impl Into<String>, service_account_id: Uuid) -> Self {
        Self {
            oid: None,
            realm_id,
            name: name.into(),
            service_account_id,
            created_at: Utc::now(),
        }
    }
}

/// Query field names for application records.
pub mod fields {
    /// Owning realm identifier.
    pub const REALM_ID: &str = "realm_id";
}
