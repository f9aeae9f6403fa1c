//! Realm record.
//!
//! A realm is the isolation boundary for the whole domain: it owns its
//! users, roles, applications, required-credential policy, and social
//! links. Mutations go through the realm aggregate manager, which
//! persists the whole record on every field change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant realm.
///
/// Besides the store-assigned `oid`, realms carry an `external_id`
/// business identifier. Child entities reference the realm by `oid`;
/// ownership checks compare against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // Domain record naturally has many boolean flags
pub struct RealmRecord {
    /// Store-assigned object identifier (`None` until first save).
    pub oid: Option<Uuid>,
    /// External/business identifier, stable across renames.
    pub external_id: String,
    /// Unique realm name. Mutable.
    pub name: String,
    /// Whether the realm is enabled.
    pub enabled: bool,

    /// Whether social login is enabled for this realm.
    pub social_login_enabled: bool,
    /// Auto-register a local user after a successful social login.
    pub auto_register_after_social_login: bool,
    /// Whether SSL is required to talk to this realm.
    pub ssl_required: bool,
    /// Whether cookie-based login is allowed.
    pub cookie_login_allowed: bool,
    /// Whether user self-registration is allowed.
    pub registration_allowed: bool,

    /// Token lifespan in seconds.
    pub token_lifespan_secs: i32,
    /// Access-code lifespan in seconds.
    pub access_code_lifespan_secs: i32,

    /// Public key, PEM body without BEGIN/END markers.
    pub public_key_pem: Option<String>,
    /// Private key, PEM body without BEGIN/END markers.
    pub private_key_pem: Option<String>,

    /// Ordered default-role object identifiers. Appends are not
    /// deduplicated; resolution drops identifiers that no longer exist.
    pub default_role_ids: Vec<Uuid>,
    /// Realm-admin user object identifiers. Appends are not deduplicated.
    pub admin_user_ids: Vec<Uuid>,

    /// When the realm was created.
    pub created_at: DateTime<Utc>,
    /// When the realm was last persisted by a setter.
    pub updated_at: DateTime<Utc>,
}

impl RealmRecord {
    /// Creates a new realm record with defaults.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            oid: None,
            external_id: Uuid::now_v7().to_string(),
            name: name.into(),
            enabled: true,
            social_login_enabled: false,
            auto_register_after_social_login: false,
            ssl_required: true,
            cookie_login_allowed: false,
            registration_allowed: false,
            token_lifespan_secs: 300,      // 5 minutes
            access_code_lifespan_secs: 60, // 1 minute
            public_key_pem: None,
            private_key_pem: None,
            default_role_ids: Vec::new(),
            admin_user_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets whether registration is allowed.
    #[must_use]
    pub const fn with_registration_allowed(mut self, allowed: bool) -> Self {
        self.registration_allowed = allowed;
        self
    }

    /// Sets whether social login is enabled.
    #[must_use]
    pub const fn with_social_login(mut self, enabled: bool) -> Self {
        self.social_login_enabled = enabled;
        self
    }
}

/// Query field names for realm records.
pub mod fields {
    /// Realm name.
    pub const NAME: &str = "name";
    /// Default-role identifier list.
    pub const DEFAULT_ROLE_IDS: &str = "default_role_ids";
    /// Realm-admin identifier list.
    pub const ADMIN_USER_IDS: &str = "admin_user_ids";
}
