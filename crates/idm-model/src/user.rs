//! User record.
//!
//! Users belong to exactly one realm and carry the identifier lists the
//! RBAC checks scan: granted roles and granted scopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user within a realm.
///
/// The login name is unique within the owning realm. Service-account
/// users created for applications are plain users with the application
/// name as their login name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned object identifier (`None` until first save).
    pub oid: Option<Uuid>,
    /// Owning realm object identifier.
    pub realm_id: Uuid,
    /// Login name, unique within the realm.
    pub login_name: String,
    /// Whether the account is enabled.
    pub enabled: bool,

    /// Granted role object identifiers. Appends are not deduplicated.
    pub role_ids: Vec<Uuid>,
    /// Granted scope object identifiers. Appends are not deduplicated.
    pub scope_ids: Vec<Uuid>,

    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a new enabled user in the given realm.
    #[must_use]
    pub fn new(realm_id: Uuid, login_name: impl Into<String>) -> Self {
        Self {
            oid: None,
            realm_id,
            login_name: login_name.into(),
            enabled: true,
            role_ids: Vec::new(),
            scope_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Query field names for user records.
pub mod fields {
    /// Login name.
    pub const LOGIN_NAME: &str = "login_name";
    /// Owning realm identifier.
    pub const REALM_ID: &str = "realm_id";
    /// Granted role identifier list.
    pub const ROLE_IDS: &str = "role_ids";
    /// Granted scope identifier list.
    pub const SCOPE_IDS: &str = "scope_ids";
}
