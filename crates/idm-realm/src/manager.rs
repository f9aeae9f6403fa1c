//! The realm aggregate manager.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use idm_credential::{CredentialHandlers, CredentialStatus};
use idm_crypto::{DerPrivateKey, DerPublicKey};
use idm_model::role::WILDCARD_ROLE;
use idm_model::{
    application, realm, required_credential, role, social_link, user, ApplicationRecord,
    ClientKind, CredentialInput, CredentialKind, CredentialTemplate, RealmRecord,
    RequiredCredential, RequiredCredentialRecord, RoleRecord, SocialLink, SocialLinkRecord,
    UserRecord,
};
use idm_store::{Criteria, DocumentStore, FieldValue, OID_FIELD};

use crate::error::{RealmError, RealmResult};
use crate::keys::KeyPairCache;
use crate::{rbac, reconcile};

/// The aggregate root for one realm.
///
/// Owns the in-memory realm record and is the only writer of
/// realm-scoped entities. Every operation implicitly filters by realm
/// ownership: records belonging to another realm read as absent.
///
/// Credential-type logic is delegated to the injected
/// [`CredentialHandlers`]; key material is decoded lazily through a
/// per-instance [`KeyPairCache`].
pub struct RealmManager<S: DocumentStore> {
    realm: RealmRecord,
    realm_oid: Uuid,
    store: Arc<S>,
    handlers: CredentialHandlers<S>,
    keys: KeyPairCache,
}

impl<S: DocumentStore> RealmManager<S> {
    /// Creates a manager over an already-persisted realm record.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::NotPersisted`] if the record has no
    /// store-assigned identifier yet.
    pub fn new(
        realm: RealmRecord,
        store: Arc<S>,
        handlers: CredentialHandlers<S>,
    ) -> RealmResult<Self> {
        let realm_oid = realm.oid.ok_or(RealmError::NotPersisted("realm"))?;
        Ok(Self {
            realm,
            realm_oid,
            store,
            handlers,
            keys: KeyPairCache::new(),
        })
    }

    /// The realm's store-assigned object identifier.
    #[must_use]
    pub const fn oid(&self) -> Uuid {
        self.realm_oid
    }

    /// The realm's external/business identifier.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.realm.external_id
    }

    /// Read access to the underlying realm record.
    #[must_use]
    pub const fn record(&self) -> &RealmRecord {
        &self.realm
    }

    /// Persists the whole realm record.
    async fn update_realm(&mut self) -> RealmResult<()> {
        self.realm.updated_at = Utc::now();
        self.store.save(&mut self.realm).await?;
        Ok(())
    }

    // === Realm fields ===

    /// Realm name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.realm.name
    }

    /// Renames the realm and persists it.
    pub async fn set_name(&mut self, name: impl Into<String> + Send) -> RealmResult<()> {
        self.realm.name = name.into();
        self.update_realm().await
    }

    /// Whether the realm is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.realm.enabled
    }

    /// Sets the enabled flag and persists the realm.
    pub async fn set_enabled(&mut self, enabled: bool) -> RealmResult<()> {
        self.realm.enabled = enabled;
        self.update_realm().await
    }

    /// Whether social login is enabled.
    #[must_use]
    pub const fn is_social_login_enabled(&self) -> bool {
        self.realm.social_login_enabled
    }

    /// Sets the social-login flag and persists the realm.
    pub async fn set_social_login_enabled(&mut self, enabled: bool) -> RealmResult<()> {
        self.realm.social_login_enabled = enabled;
        self.update_realm().await
    }

    /// Whether a local user is auto-registered after social login.
    #[must_use]
    pub const fn is_auto_register_after_social_login(&self) -> bool {
        self.realm.auto_register_after_social_login
    }

    /// Sets the auto-registration flag and persists the realm.
    pub async fn set_auto_register_after_social_login(&mut self, enabled: bool) -> RealmResult<()> {
        self.realm.auto_register_after_social_login = enabled;
        self.update_realm().await
    }

    /// Whether SSL is required.
    #[must_use]
    pub const fn is_ssl_required(&self) -> bool {
        self.realm.ssl_required
    }

    /// Sets the SSL requirement and persists the realm.
    pub async fn set_ssl_required(&mut self, required: bool) -> RealmResult<()> {
        self.realm.ssl_required = required;
        self.update_realm().await
    }

    /// Whether cookie login is allowed.
    #[must_use]
    pub const fn is_cookie_login_allowed(&self) -> bool {
        self.realm.cookie_login_allowed
    }

    /// Sets the cookie-login flag and persists the realm.
    pub async fn set_cookie_login_allowed(&mut self, allowed: bool) -> RealmResult<()> {
        self.realm.cookie_login_allowed = allowed;
        self.update_realm().await
    }

    /// Whether self-registration is allowed.
    #[must_use]
    pub const fn is_registration_allowed(&self) -> bool {
        self.realm.registration_allowed
    }

    /// Sets the registration flag and persists the realm.
    pub async fn set_registration_allowed(&mut self, allowed: bool) -> RealmResult<()> {
        self.realm.registration_allowed = allowed;
        self.update_realm().await
    }

    /// Token lifespan in seconds.
    #[must_use]
    pub const fn token_lifespan_secs(&self) -> i32 {
        self.realm.token_lifespan_secs
    }

    /// Sets the token lifespan and persists the realm.
    pub async fn set_token_lifespan_secs(&mut self, secs: i32) -> RealmResult<()> {
        self.realm.token_lifespan_secs = secs;
        self.update_realm().await
    }

    /// Access-code lifespan in seconds.
    #[must_use]
    pub const fn access_code_lifespan_secs(&self) -> i32 {
        self.realm.access_code_lifespan_secs
    }

    /// Sets the access-code lifespan and persists the realm.
    pub async fn set_access_code_lifespan_secs(&mut self, secs: i32) -> RealmResult<()> {
        self.realm.access_code_lifespan_secs = secs;
        self.update_realm().await
    }

    // === Key material ===

    /// Public key PEM body, if set.
    #[must_use]
    pub fn public_key_pem(&self) -> Option<&str> {
        self.realm.public_key_pem.as_deref()
    }

    /// Replaces the public key PEM, invalidating the decoded cache.
    pub async fn set_public_key_pem(&mut self, pem: impl Into<String> + Send) -> RealmResult<()> {
        self.realm.public_key_pem = Some(pem.into());
        self.keys.invalidate_public();
        self.update_realm().await
    }

    /// The decoded public key, decoding the PEM field on first access.
    pub fn public_key(&self) -> RealmResult<Option<Arc<DerPublicKey>>> {
        Ok(self
            .keys
            .public_or_decode(self.realm.public_key_pem.as_deref())?)
    }

    /// Stores a decoded public key: encodes it to a PEM body on the
    /// realm record, persists the realm, and primes the cache.
    pub async fn set_public_key(&mut self, key: DerPublicKey) -> RealmResult<()> {
        self.realm.public_key_pem = Some(key.to_pem_body());
        self.keys.store_public(key);
        self.update_realm().await
    }

    /// Private key PEM body, if set.
    #[must_use]
    pub fn private_key_pem(&self) -> Option<&str> {
        self.realm.private_key_pem.as_deref()
    }

    /// Replaces the private key PEM, invalidating the decoded cache.
    pub async fn set_private_key_pem(&mut self, pem: impl Into<String> + Send) -> RealmResult<()> {
        self.realm.private_key_pem = Some(pem.into());
        self.keys.invalidate_private();
        self.update_realm().await
    }

    /// The decoded private key, decoding the PEM field on first access.
    pub fn private_key(&self) -> RealmResult<Option<Arc<DerPrivateKey>>> {
        Ok(self
            .keys
            .private_or_decode(self.realm.private_key_pem.as_deref())?)
    }

    /// Stores a decoded private key: encodes it to a PEM body on the
    /// realm record, persists the realm, and primes the cache.
    pub async fn set_private_key(&mut self, key: DerPrivateKey) -> RealmResult<()> {
        self.realm.private_key_pem = Some(key.to_pem_body());
        self.keys.store_private(key);
        self.update_realm().await
    }

    // === Users ===

    /// Finds a user by login name.
    pub async fn user(&self, login_name: &str) -> RealmResult<Option<UserRecord>> {
        Ok(self
            .store
            .find_one(
                Criteria::new()
                    .eq(user::fields::LOGIN_NAME, login_name)
                    .eq(user::fields::REALM_ID, self.realm_oid),
            )
            .await?)
    }

    /// Creates a new enabled user.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::AlreadyExists`] if the login name is taken
    /// in this realm.
    pub async fn create_user(&self, login_name: &str) -> RealmResult<UserRecord> {
        if self.user(login_name).await?.is_some() {
            return Err(RealmError::AlreadyExists {
                entity: "user",
                name: login_name.to_string(),
            });
        }

        let mut record = UserRecord::new(self.realm_oid, login_name);
        self.store.save(&mut record).await?;
        info!(realm = %self.realm.name, login_name, "created user");
        Ok(record)
    }

    /// Deletes users with the given login name in this realm; returns
    /// the number removed.
    pub async fn remove_user(&self, login_name: &str) -> RealmResult<u64> {
        Ok(self
            .store
            .remove_all::<UserRecord>(
                Criteria::new()
                    .eq(user::fields::LOGIN_NAME, login_name)
                    .eq(user::fields::REALM_ID, self.realm_oid),
            )
            .await?)
    }

    // === Roles ===

    /// Finds a role by name.
    pub async fn role(&self, name: &str) -> RealmResult<Option<RoleRecord>> {
        Ok(self
            .store
            .find_one(
                Criteria::new()
                    .eq(role::fields::NAME, name)
                    .eq(role::fields::REALM_ID, self.realm_oid),
            )
            .await?)
    }

    /// Creates a new role.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::AlreadyExists`] if the name is taken in
    /// this realm.
    pub async fn create_role(&self, name: &str) -> RealmResult<RoleRecord> {
        if self.role(name).await?.is_some() {
            return Err(RealmError::AlreadyExists {
                entity: "role",
                name: name.to_string(),
            });
        }

        let mut record = RoleRecord::new(self.realm_oid, name);
        self.store.save(&mut record).await?;
        info!(realm = %self.realm.name, role = name, "created role");
        Ok(record)
    }

    /// All roles in this realm. Order not guaranteed.
    pub async fn roles(&self) -> RealmResult<Vec<RoleRecord>> {
        Ok(self
            .store
            .find_all(Criteria::new().eq(role::fields::REALM_ID, self.realm_oid))
            .await?)
    }

    /// Loads a role by identifier; a role owned by another realm reads
    /// as absent.
    pub async fn role_by_id(&self, oid: Uuid) -> RealmResult<Option<RoleRecord>> {
        let found: Option<RoleRecord> = self.store.load(oid).await?;
        Ok(found.filter(|role| role.realm_id == self.realm_oid))
    }

    async fn find_or_create_role(&self, name: &str) -> RealmResult<RoleRecord> {
        match self.role(name).await? {
            Some(role) => Ok(role),
            None => self.create_role(name).await,
        }
    }

    // === Default roles ===

    /// Resolves the realm's default-role identifier list.
    ///
    /// Identifiers that no longer resolve are silently dropped from the
    /// result; the realm record is not reconciled.
    pub async fn default_roles(&self) -> RealmResult<Vec<RoleRecord>> {
        Ok(self
            .store
            .find_all(Criteria::new().any_of(OID_FIELD, &self.realm.default_role_ids))
            .await?)
    }

    /// Finds or creates the named role, then appends its identifier to
    /// the default-role list.
    ///
    /// Append, no pre-check: repeated calls append duplicates.
    pub async fn add_default_role(&mut self, name: &str) -> RealmResult<()> {
        let role = self.find_or_create_role(name).await?;
        let role_oid = role.oid.ok_or(RealmError::NotPersisted("role"))?;
        self.store
            .push_to_list(
                &mut self.realm,
                realm::fields::DEFAULT_ROLE_IDS,
                FieldValue::Id(role_oid),
            )
            .await?;
        Ok(())
    }

    /// Replaces the default-role list wholesale with the named roles,
    /// creating any that do not exist yet.
    pub async fn set_default_roles(&mut self, names: &[&str]) -> RealmResult<()> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let role = self.find_or_create_role(name).await?;
            ids.push(role.oid.ok_or(RealmError::NotPersisted("role"))?);
        }
        self.realm.default_role_ids = ids;
        self.update_realm().await
    }

    // === Applications ===

    /// Loads an application by identifier; an application owned by
    /// another realm reads as absent.
    pub async fn application_by_id(&self, oid: Uuid) -> RealmResult<Option<ApplicationRecord>> {
        let found: Option<ApplicationRecord> = self.store.load(oid).await?;
        Ok(found.filter(|app| app.realm_id == self.realm_oid))
    }

    /// All applications in this realm.
    pub async fn applications(&self) -> RealmResult<Vec<ApplicationRecord>> {
        Ok(self
            .store
            .find_all(Criteria::new().eq(application::fields::REALM_ID, self.realm_oid))
            .await?)
    }

    /// Applications keyed by name.
    pub async fn application_name_map(&self) -> RealmResult<HashMap<String, ApplicationRecord>> {
        Ok(self
            .applications()
            .await?
            .into_iter()
            .map(|app| (app.name.clone(), app))
            .collect())
    }

    /// Creates an application with its backing service account.
    ///
    /// Compound workflow: create the service-account user (fails with
    /// [`RealmError::AlreadyExists`] on a login-name collision), create
    /// the application record, grant the wildcard role `*` (created if
    /// absent) to the service account, grant it the wildcard scope.
    /// The steps commit individually; a storage failure partway leaves
    /// the completed steps in place.
    pub async fn create_application(&self, name: &str) -> RealmResult<ApplicationRecord> {
        let mut account = self.create_user(name).await?;
        let account_oid = account.oid.ok_or(RealmError::NotPersisted("user"))?;

        let mut app = ApplicationRecord::new(self.realm_oid, name, account_oid);
        self.store.save(&mut app).await?;

        let wildcard = self.find_or_create_role(WILDCARD_ROLE).await?;
        self.grant_role(&mut account, &wildcard).await?;
        self.add_scope(&mut account, WILDCARD_ROLE).await?;

        info!(realm = %self.realm.name, application = name, "created application");
        Ok(app)
    }

    // === Role and scope grants ===

    /// Appends the role's identifier to the user's role list.
    ///
    /// Atomic append at the storage layer; membership is not checked
    /// first, so repeated grants append duplicates.
    pub async fn grant_role(&self, user: &mut UserRecord, role: &RoleRecord) -> RealmResult<()> {
        let role_oid = role.oid.ok_or(RealmError::NotPersisted("role"))?;
        self.store
            .push_to_list(user, user::fields::ROLE_IDS, FieldValue::Id(role_oid))
            .await?;
        Ok(())
    }

    /// Exact membership test against the user's role list.
    #[must_use]
    pub fn has_role(&self, user: &UserRecord, role: &RoleRecord) -> bool {
        role.oid
            .is_some_and(|role_oid| rbac::holds(&user.role_ids, role_oid))
    }

    /// Resolves the role by name first; an unresolved name is never
    /// held.
    pub async fn has_role_named(&self, user: &UserRecord, name: &str) -> RealmResult<bool> {
        Ok(match self.role(name).await? {
            Some(role) => self.has_role(user, &role),
            None => false,
        })
    }

    /// Names of the user's granted roles, restricted to roles owned by
    /// this realm.
    pub async fn role_names(&self, user: &UserRecord) -> RealmResult<HashSet<String>> {
        let roles: Vec<RoleRecord> = self
            .store
            .find_all(Criteria::new().any_of(OID_FIELD, &user.role_ids))
            .await?;
        Ok(rbac::realm_role_names(&roles, self.realm_oid))
    }

    /// Appends the named role's identifier to the agent's scope list.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::RoleNotFound`] if no such role exists in
    /// this realm.
    pub async fn add_scope(&self, agent: &mut UserRecord, role_name: &str) -> RealmResult<()> {
        let role = self
            .role(role_name)
            .await?
            .ok_or_else(|| RealmError::RoleNotFound(role_name.to_string()))?;
        let role_oid = role.oid.ok_or(RealmError::NotPersisted("role"))?;
        self.store
            .push_to_list(agent, user::fields::SCOPE_IDS, FieldValue::Id(role_oid))
            .await?;
        Ok(())
    }

    /// Names of the agent's granted scopes, restricted to roles owned
    /// by this realm.
    pub async fn scope_names(&self, agent: &UserRecord) -> RealmResult<HashSet<String>> {
        let roles: Vec<RoleRecord> = self
            .store
            .find_all(Criteria::new().any_of(OID_FIELD, &agent.scope_ids))
            .await?;
        Ok(rbac::realm_role_names(&roles, self.realm_oid))
    }

    // === Realm admins ===

    /// Whether the agent is listed as a realm admin.
    #[must_use]
    pub fn is_realm_admin(&self, agent: &UserRecord) -> bool {
        agent
            .oid
            .is_some_and(|agent_oid| rbac::holds(&self.realm.admin_user_ids, agent_oid))
    }

    /// Appends the agent to the realm-admin list. Append, no dedup.
    pub async fn add_realm_admin(&mut self, agent: &UserRecord) -> RealmResult<()> {
        let agent_oid = agent.oid.ok_or(RealmError::NotPersisted("user"))?;
        self.store
            .push_to_list(
                &mut self.realm,
                realm::fields::ADMIN_USER_IDS,
                FieldValue::Id(agent_oid),
            )
            .await?;
        Ok(())
    }

    // === Required credentials ===

    /// Declares a required credential for end users.
    pub async fn add_required_credential(&self, credential_type: &str) -> RealmResult<()> {
        self.add_required(credential_type, ClientKind::User).await
    }

    /// Declares a required credential for applications.
    pub async fn add_required_application_credential(
        &self,
        credential_type: &str,
    ) -> RealmResult<()> {
        self.add_required(credential_type, ClientKind::Application)
            .await
    }

    /// Declares a required credential for OAuth clients.
    pub async fn add_required_oauth_credential(&self, credential_type: &str) -> RealmResult<()> {
        self.add_required(credential_type, ClientKind::OauthClient)
            .await
    }

    /// Stamps a declaration from the built-in template.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::UnknownCredentialType`] if no built-in
    /// template exists for the type.
    async fn add_required(&self, credential_type: &str, kind: ClientKind) -> RealmResult<()> {
        let template = CredentialTemplate::built_in(credential_type)
            .ok_or_else(|| RealmError::UnknownCredentialType(credential_type.to_string()))?;
        let mut record = RequiredCredentialRecord::from_template(self.realm_oid, kind, template);
        self.store.save(&mut record).await?;
        Ok(())
    }

    /// Required credentials declared for end users.
    pub async fn required_credentials(&self) -> RealmResult<Vec<RequiredCredential>> {
        self.required(ClientKind::User).await
    }

    /// Required credentials declared for applications.
    pub async fn required_application_credentials(&self) -> RealmResult<Vec<RequiredCredential>> {
        self.required(ClientKind::Application).await
    }

    /// Required credentials declared for OAuth clients.
    pub async fn required_oauth_credentials(&self) -> RealmResult<Vec<RequiredCredential>> {
        self.required(ClientKind::OauthClient).await
    }

    async fn required(&self, kind: ClientKind) -> RealmResult<Vec<RequiredCredential>> {
        Ok(self
            .declarations(kind)
            .await?
            .iter()
            .map(RequiredCredential::from)
            .collect())
    }

    async fn declarations(&self, kind: ClientKind) -> RealmResult<Vec<RequiredCredentialRecord>> {
        Ok(self
            .store
            .find_all(
                Criteria::new()
                    .eq(required_credential::fields::REALM_ID, self.realm_oid)
                    .eq(required_credential::fields::CLIENT_KIND, kind.as_str()),
            )
            .await?)
    }

    /// Reconciles the end-user required-credential set to `desired`.
    pub async fn update_required_credentials(
        &self,
        desired: &HashSet<String>,
    ) -> RealmResult<()> {
        self.update_required(desired, ClientKind::User).await
    }

    /// Reconciles the application required-credential set to `desired`.
    pub async fn update_required_application_credentials(
        &self,
        desired: &HashSet<String>,
    ) -> RealmResult<()> {
        self.update_required(desired, ClientKind::Application).await
    }

    /// Reconciles the OAuth-client required-credential set to `desired`.
    pub async fn update_required_oauth_credentials(
        &self,
        desired: &HashSet<String>,
    ) -> RealmResult<()> {
        self.update_required(desired, ClientKind::OauthClient).await
    }

    /// Applies the reconciliation delta: deletions first, then
    /// creations. Not atomic across the batch; an unknown desired type
    /// fails the operation at its creation step.
    async fn update_required(&self, desired: &HashSet<String>, kind: ClientKind) -> RealmResult<()> {
        let current = self.declarations(kind).await?;
        let delta = reconcile::diff(&current, desired);

        for record in &delta.to_delete {
            debug!(
                realm = %self.realm.name,
                credential_type = %record.credential_type,
                client_kind = kind.as_str(),
                "removing required credential"
            );
            self.store.remove(record).await?;
        }
        for credential_type in &delta.to_create {
            debug!(
                realm = %self.realm.name,
                credential_type = %credential_type,
                client_kind = kind.as_str(),
                "adding required credential"
            );
            self.add_required(credential_type, kind).await?;
        }
        Ok(())
    }

    // === Credential validation and update ===

    /// Validates a password through the injected password strategy.
    pub async fn validate_password(&self, user: &UserRecord, password: &str) -> RealmResult<bool> {
        let status = self
            .handlers
            .password
            .validate(self.store.as_ref(), user, password)
            .await?;
        Ok(status == CredentialStatus::Valid)
    }

    /// Validates a TOTP login.
    ///
    /// One-time-password validation is not implemented in this
    /// revision: the OTP strategy is an always-invalid stub, so this
    /// always reports failure. The password argument is not consulted.
    pub async fn validate_totp(
        &self,
        user: &UserRecord,
        _password: &str,
        token: &str,
    ) -> RealmResult<bool> {
        let status = self
            .handlers
            .otp
            .validate(self.store.as_ref(), user, token)
            .await?;
        Ok(status == CredentialStatus::Valid)
    }

    /// Dispatches a credential update to the matching strategy.
    ///
    /// Certificate and secret updates are accepted as no-ops.
    pub async fn update_credential(
        &self,
        user: &UserRecord,
        credential: &CredentialInput,
    ) -> RealmResult<()> {
        match credential.kind {
            CredentialKind::Password => {
                self.handlers
                    .password
                    .update(self.store.as_ref(), user, &credential.value, None, None)
                    .await?;
            }
            CredentialKind::Totp => {
                self.handlers
                    .otp
                    .update(
                        self.store.as_ref(),
                        user,
                        &credential.value,
                        credential.device.as_deref(),
                        None,
                    )
                    .await?;
            }
            CredentialKind::ClientCert | CredentialKind::Secret => {
                debug!(
                    credential_type = credential.kind.as_str(),
                    "accepting unsupported credential type as a no-op"
                );
            }
        }
        Ok(())
    }

    // === Social links ===

    /// Resolves a (provider, username) pair to its bound user.
    ///
    /// A link bound to a since-deleted user reads as absent; the
    /// dangling link is logged but not pruned on this read path.
    pub async fn user_by_social_link(&self, link: &SocialLink) -> RealmResult<Option<UserRecord>> {
        let found: Option<SocialLinkRecord> = self
            .store
            .find_one(
                Criteria::new()
                    .eq(social_link::fields::PROVIDER, link.provider.as_str())
                    .eq(
                        social_link::fields::PROVIDER_USERNAME,
                        link.provider_username.as_str(),
                    )
                    .eq(social_link::fields::REALM_ID, self.realm_oid),
            )
            .await?;
        let Some(record) = found else {
            return Ok(None);
        };

        let bound: Option<UserRecord> = self.store.load(record.user_id).await?;
        if bound.is_none() {
            warn!(
                realm = %self.realm.name,
                provider = %link.provider,
                provider_username = %link.provider_username,
                "social link is bound to a missing user"
            );
        }
        Ok(bound)
    }

    /// The user's social links as (provider, username) pairs.
    pub async fn social_links(&self, user: &UserRecord) -> RealmResult<HashSet<SocialLink>> {
        let user_oid = user.oid.ok_or(RealmError::NotPersisted("user"))?;
        let records: Vec<SocialLinkRecord> = self
            .store
            .find_all(Criteria::new().eq(social_link::fields::USER_ID, user_oid))
            .await?;
        Ok(records.iter().map(SocialLinkRecord::link).collect())
    }

    /// Binds a social identity to the user.
    pub async fn add_social_link(&self, user: &UserRecord, link: &SocialLink) -> RealmResult<()> {
        let user_oid = user.oid.ok_or(RealmError::NotPersisted("user"))?;
        let mut record = SocialLinkRecord::new(self.realm_oid, user_oid, link);
        self.store.save(&mut record).await?;
        Ok(())
    }

    /// Removes the user's binding for the given (provider, username)
    /// pair; returns the number of records removed.
    pub async fn remove_social_link(
        &self,
        user: &UserRecord,
        link: &SocialLink,
    ) -> RealmResult<u64> {
        let user_oid = user.oid.ok_or(RealmError::NotPersisted("user"))?;
        Ok(self
            .store
            .remove_all::<SocialLinkRecord>(
                Criteria::new()
                    .eq(social_link::fields::PROVIDER, link.provider.as_str())
                    .eq(
                        social_link::fields::PROVIDER_USERNAME,
                        link.provider_username.as_str(),
                    )
                    .eq(social_link::fields::USER_ID, user_oid),
            )
            .await?)
    }
}
