//! Required-credential declarations and the built-in template registry.
//!
//! A realm declares, per client category, which credential types an
//! actor must supply. Declarations are created from built-in templates
//! keyed by type name; the set reconciler keeps the stored declarations
//! equal to the desired type set.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client category a required-credential declaration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientKind {
    /// End users logging in interactively.
    User,
    /// Applications / resources authenticating themselves.
    Application,
    /// OAuth clients.
    OauthClient,
}

impl ClientKind {
    /// Returns the string representation used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Application => "application",
            Self::OauthClient => "oauth-client",
        }
    }
}

/// A built-in credential template.
///
/// Templates define the display and handling flags for a credential
/// type; realm declarations are stamped out from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialTemplate {
    /// Credential type key (e.g. `"password"`).
    pub credential_type: &'static str,
    /// Label shown on login forms.
    pub form_label: &'static str,
    /// Whether the credential is supplied through form input.
    pub input: bool,
    /// Whether the credential value is secret (masked, never echoed).
    pub secret: bool,
}

/// Built-in templates, keyed by type name.
const BUILT_IN: &[CredentialTemplate] = &[
    CredentialTemplate {
        credential_type: "password",
        form_label: "Password",
        input: true,
        secret: true,
    },
    CredentialTemplate {
        credential_type: "totp",
        form_label: "Authenticator Code",
        input: true,
        secret: true,
    },
    CredentialTemplate {
        credential_type: "cert",
        form_label: "Client Certificate",
        input: false,
        secret: false,
    },
    CredentialTemplate {
        credential_type: "secret",
        form_label: "Secret",
        input: false,
        secret: true,
    },
];

impl CredentialTemplate {
    /// Looks up a built-in template by type name.
    #[must_use]
    pub fn built_in(credential_type: &str) -> Option<&'static Self> {
        BUILT_IN
            .iter()
            .find(|t| t.credential_type == credential_type)
    }
}

/// A stored required-credential declaration.
///
/// At most one declaration exists per (realm, client kind, type) once
/// reconciliation has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredCredentialRecord {
    /// Store-assigned object identifier (`None` until first save).
    pub oid: Option<Uuid>,
    /// Owning realm object identifier.
    pub realm_id: Uuid,
    /// Client category this declaration applies to.
    pub client_kind: ClientKind,
    /// Credential type key.
    pub credential_type: String,
    /// Label shown on login forms.
    pub form_label: String,
    /// Whether the credential is supplied through form input.
    pub input: bool,
    /// Whether the credential value is secret.
    pub secret: bool,
}

impl RequiredCredentialRecord {
    /// Stamps a declaration out of a template for the given realm and
    /// client category.
    #[must_use]
    pub fn from_template(realm_id: Uuid, client_kind: ClientKind, t: &CredentialTemplate) -> Self {
        Self {
            oid: None,
            realm_id,
            client_kind,
            credential_type: t.credential_type.to_string(),
            form_label: t.form_label.to_string(),
            input: t.input,
            secret: t.secret,
        }
    }
}

/// Caller-facing view of a required credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCredential {
    /// Credential type key.
    pub credential_type: String,
    /// Label shown on login forms.
    pub form_label: String,
    /// Whether the credential is supplied through form input.
    pub input: bool,
    /// Whether the credential value is secret.
    pub secret: bool,
}

impl From<&RequiredCredentialRecord> for RequiredCredential {
    fn from(rec: &RequiredCredentialRecord) -> Self {
        Self {
            credential_type: rec.credential_type.clone(),
            form_label: rec.form_label.clone(),
            input: rec.input,
            secret: rec.secret,
        }
    }
}

/// Query field names for required-credential records.
pub mod fields {
    /// Owning realm identifier.
    pub const REALM_ID: &str = "realm_id";
    /// Client category.
    pub const CLIENT_KIND: &str = "client_kind";
    /// Credential type key.
    pub const CREDENTIAL_TYPE: &str = "credential_type";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_lookup() {
        let password = CredentialTemplate::built_in("password").unwrap();
        assert!(password.input);
        assert!(password.secret);

        assert!(CredentialTemplate::built_in("retina-scan").is_none());
    }

    #[test]
    fn declaration_from_template() {
        let realm_id = Uuid::now_v7();
        let t = CredentialTemplate::built_in("totp").unwrap();
        let rec = RequiredCredentialRecord::from_template(realm_id, ClientKind::User, t);

        assert_eq!(rec.credential_type, "totp");
        assert_eq!(rec.client_kind, ClientKind::User);
        assert_eq!(rec.realm_id, realm_id);
    }

    #[test]
    fn client_kind_storage_names() {
        assert_eq!(ClientKind::User.as_str(), "user");
        assert_eq!(ClientKind::Application.as_str(), "application");
        assert_eq!(ClientKind::OauthClient.as_str(), "oauth-client");
    }
}
