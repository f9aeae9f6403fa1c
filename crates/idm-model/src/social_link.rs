//! Social-identity link records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A (provider, external username) pair identifying a social identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SocialLink {
    /// Social provider alias (e.g. `"google"`).
    pub provider: String,
    /// Username at the provider.
    pub provider_username: String,
}

impl SocialLink {
    /// Creates a new link pair.
    #[must_use]
    pub fn new(provider: impl Into<String>, provider_username: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            provider_username: provider_username.into(),
        }
    }
}

/// A stored binding between a local user and a social identity.
///
/// A given (provider, username) pair resolves to at most one user per
/// realm; a user may hold links to several providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLinkRecord {
    /// Store-assigned object identifier (`None` until first save).
    pub oid: Option<Uuid>,
    /// Owning realm object identifier.
    pub realm_id: Uuid,
    /// Bound user object identifier.
    pub user_id: Uuid,
    /// Social provider alias.
    pub provider: String,
    /// Username at the provider.
    pub provider_username: String,
}

impl SocialLinkRecord {
    /// Creates a new binding for the given user.
    #[must_use]
    pub fn new(realm_id: Uuid, user_id: Uuid, link: &SocialLink) -> Self {
        Self {
            oid: None,
            realm_id,
            user_id,
            provider: link.provider.clone(),
            provider_username: link.provider_username.clone(),
        }
    }

    /// Returns the (provider, username) pair view.
    #[must_use]
    pub fn link(&self) -> SocialLink {
        SocialLink::new(self.provider.clone(), self.provider_username.clone())
    }
}

/// Query field names for social-link records.
pub mod fields {
    /// Owning realm identifier.
    pub const REALM_ID: &str = "realm_id";
    /// Bound user identifier.
    pub const USER_ID: &str = "user_id";
    /// Social provider alias.
    pub const PROVIDER: &str = "provider";
    /// Username at the provider.
    pub const PROVIDER_USERNAME: &str = "provider_username";
}
