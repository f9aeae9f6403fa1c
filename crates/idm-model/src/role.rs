//! Role record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the wildcard role granted to applications on creation.
pub const WILDCARD_ROLE: &str = "*";

/// A named permission grouping scoped to a realm.
///
/// Role names are unique within their realm. Roles are created
/// explicitly, or implicitly when an application is created (the
/// wildcard role) or when an unknown name is added as a default role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Store-assigned object identifier (`None` until first save).
    pub oid: Option<Uuid>,
    /// Owning realm object identifier.
    pub realm_id: Uuid,
    /// Role name, unique within the realm.
    pub name: String,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

impl RoleRecord {
    /// Creates a new role in the given realm.
    #[must_use]
    pub fn new(realm_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            oid: None,
            realm_id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// Query field names for role records.
pub mod fields {
    /// Role name.
    pub const NAME: &str = "name";
    /// Owning realm identifier.
    pub const REALM_ID: &str = "realm_id";
}
