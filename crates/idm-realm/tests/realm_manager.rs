//! End-to-end tests for the realm aggregate manager over the in-memory
//! store.

use std::collections::HashSet;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use idm_credential::{
    CredentialHandlers, OtpCredentialHandler, PasswordCredentialHandler, PasswordPolicy,
};
use idm_crypto::DerPublicKey;
use idm_model::role::WILDCARD_ROLE;
use idm_model::user::fields as user_fields;
use idm_model::{CredentialInput, CredentialKind, RealmRecord, SocialLink};
use idm_realm::{RealmError, RealmManager};
use idm_store::{DocumentStore, FieldValue, MemoryStore};

// SEQUENCE { INTEGER 1 } and SEQUENCE { INTEGER 2 }
const DER_A: &[u8] = &[0x30, 0x03, 0x02, 0x01, 0x01];
const DER_B: &[u8] = &[0x30, 0x03, 0x02, 0x01, 0x02];

fn handlers() -> CredentialHandlers<MemoryStore> {
    // Minimal Argon2 parameters keep the tests fast.
    CredentialHandlers::new(
        Arc::new(PasswordCredentialHandler::new(
            PasswordPolicy::new()
                .memory_cost(8)
                .time_cost(1)
                .parallelism(1),
        )),
        Arc::new(OtpCredentialHandler),
    )
}

async fn manager(store: &Arc<MemoryStore>, name: &str) -> RealmManager<MemoryStore> {
    let mut realm = RealmRecord::new(name);
    store.save(&mut realm).await.unwrap();
    RealmManager::new(realm, Arc::clone(store), handlers()).unwrap()
}

fn types(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

#[tokio::test]
async fn duplicate_login_name_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm.create_user("alice").await.unwrap();
    let err = realm.create_user("alice").await.unwrap_err();
    assert!(matches!(err, RealmError::AlreadyExists { entity: "user", .. }));

    // The same login name is free in another realm.
    let other = manager(&store, "globex").await;
    other.create_user("alice").await.unwrap();
}

#[tokio::test]
async fn duplicate_role_name_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm.create_role("admin").await.unwrap();
    let err = realm.create_role("admin").await.unwrap_err();
    assert!(matches!(err, RealmError::AlreadyExists { entity: "role", .. }));
}

#[tokio::test]
async fn lookups_are_realm_isolated() {
    let store = Arc::new(MemoryStore::new());
    let acme = manager(&store, "acme").await;
    let globex = manager(&store, "globex").await;

    let foreign_role = globex.create_role("auditor").await.unwrap();
    let foreign_app = globex.create_application("ledger").await.unwrap();

    assert!(acme.role("auditor").await.unwrap().is_none());
    assert!(acme
        .role_by_id(foreign_role.oid.unwrap())
        .await
        .unwrap()
        .is_none());
    assert!(acme
        .application_by_id(foreign_app.oid.unwrap())
        .await
        .unwrap()
        .is_none());

    // The owner still sees both.
    assert!(globex.role("auditor").await.unwrap().is_some());
    assert!(globex
        .application_by_id(foreign_app.oid.unwrap())
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn create_application_provisions_account_role_and_scope() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    let app = realm.create_application("billing").await.unwrap();
    assert_eq!(app.name, "billing");

    let account = realm.user("billing").await.unwrap().unwrap();
    assert_eq!(app.service_account_id, account.oid.unwrap());

    let wildcard = realm.role(WILDCARD_ROLE).await.unwrap().unwrap();
    assert!(realm.has_role(&account, &wildcard));
    assert!(realm.has_role_named(&account, WILDCARD_ROLE).await.unwrap());

    let scopes = realm.scope_names(&account).await.unwrap();
    assert!(scopes.contains(WILDCARD_ROLE));

    let apps = realm.applications().await.unwrap();
    assert_eq!(apps.len(), 1);
    let by_name = realm.application_name_map().await.unwrap();
    assert!(by_name.contains_key("billing"));
}

#[tokio::test]
async fn second_application_reuses_wildcard_role() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm.create_application("billing").await.unwrap();
    realm.create_application("shipping").await.unwrap();

    // One wildcard role, two applications.
    let roles = realm.roles().await.unwrap();
    let wildcards = roles.iter().filter(|r| r.name == WILDCARD_ROLE).count();
    assert_eq!(wildcards, 1);
    assert_eq!(realm.applications().await.unwrap().len(), 2);
}

#[tokio::test]
async fn application_name_collision_aborts_creation() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm.create_user("billing").await.unwrap();
    let err = realm.create_application("billing").await.unwrap_err();
    assert!(matches!(err, RealmError::AlreadyExists { entity: "user", .. }));
    assert!(realm.applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn reconciliation_converges_and_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm
        .update_required_credentials(&types(&["password", "totp"]))
        .await
        .unwrap();
    realm
        .update_required_credentials(&types(&["password", "totp"]))
        .await
        .unwrap();

    let declared = realm.required_credentials().await.unwrap();
    let declared_types: HashSet<String> =
        declared.iter().map(|c| c.credential_type.clone()).collect();
    assert_eq!(declared_types, types(&["password", "totp"]));
    // Idempotent: one declaration per type even after the second call.
    assert_eq!(declared.len(), 2);
}

#[tokio::test]
async fn reconciliation_applies_the_delta() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm
        .update_required_credentials(&types(&["password", "totp"]))
        .await
        .unwrap();
    realm
        .update_required_credentials(&types(&["totp", "cert"]))
        .await
        .unwrap();

    let declared = realm.required_credentials().await.unwrap();
    let declared_types: HashSet<String> =
        declared.iter().map(|c| c.credential_type.clone()).collect();
    assert_eq!(declared_types, types(&["totp", "cert"]));
    assert_eq!(declared.len(), 2);
}

#[tokio::test]
async fn reconciliation_with_empty_set_deletes_everything() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm
        .update_required_credentials(&types(&["password", "totp"]))
        .await
        .unwrap();
    realm
        .update_required_credentials(&HashSet::new())
        .await
        .unwrap();

    assert!(realm.required_credentials().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_categories_are_reconciled_independently() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    realm
        .update_required_credentials(&types(&["password"]))
        .await
        .unwrap();
    realm
        .update_required_application_credentials(&types(&["secret"]))
        .await
        .unwrap();
    realm
        .update_required_oauth_credentials(&types(&["cert"]))
        .await
        .unwrap();

    assert_eq!(realm.required_credentials().await.unwrap().len(), 1);
    let app_creds = realm.required_application_credentials().await.unwrap();
    assert_eq!(app_creds.len(), 1);
    assert_eq!(app_creds[0].credential_type, "secret");
    assert_eq!(realm.required_oauth_credentials().await.unwrap().len(), 1);

    // Emptying one category leaves the others alone.
    realm
        .update_required_credentials(&HashSet::new())
        .await
        .unwrap();
    assert!(realm.required_credentials().await.unwrap().is_empty());
    assert_eq!(realm.required_application_credentials().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_credential_type_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    let err = realm.add_required_credential("retina-scan").await.unwrap_err();
    assert!(matches!(err, RealmError::UnknownCredentialType(_)));

    let err = realm
        .update_required_credentials(&types(&["password", "retina-scan"]))
        .await
        .unwrap_err();
    assert!(matches!(err, RealmError::UnknownCredentialType(_)));
}

#[tokio::test]
async fn default_roles_find_or_create_and_append() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    realm.create_role("viewer").await.unwrap();
    realm.add_default_role("viewer").await.unwrap();
    realm.add_default_role("editor").await.unwrap(); // created on the fly

    let defaults = realm.default_roles().await.unwrap();
    let names: HashSet<&str> = defaults.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, HashSet::from(["viewer", "editor"]));
}

#[tokio::test]
async fn repeated_default_role_add_appends_duplicates() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    realm.add_default_role("viewer").await.unwrap();
    realm.add_default_role("viewer").await.unwrap();

    // Append, no pre-check: the realm record carries the duplicate.
    assert_eq!(realm.record().default_role_ids.len(), 2);
    // Resolution still yields the single role record.
    assert_eq!(realm.default_roles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unresolved_default_role_ids_are_dropped_silently() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    realm.add_default_role("ephemeral").await.unwrap();
    let role = realm.role("ephemeral").await.unwrap().unwrap();
    store.remove(&role).await.unwrap();

    assert!(realm.default_roles().await.unwrap().is_empty());
    // The stale identifier stays on the realm record.
    assert_eq!(realm.record().default_role_ids.len(), 1);
}

#[tokio::test]
async fn set_default_roles_replaces_wholesale() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    realm.add_default_role("viewer").await.unwrap();
    realm.set_default_roles(&["editor", "auditor"]).await.unwrap();

    let defaults = realm.default_roles().await.unwrap();
    let names: HashSet<&str> = defaults.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, HashSet::from(["editor", "auditor"]));
    assert_eq!(realm.record().default_role_ids.len(), 2);
}

#[tokio::test]
async fn grant_role_appends_without_membership_check() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    let mut user = realm.create_user("alice").await.unwrap();
    let role = realm.create_role("admin").await.unwrap();

    realm.grant_role(&mut user, &role).await.unwrap();
    realm.grant_role(&mut user, &role).await.unwrap();

    assert_eq!(user.role_ids.len(), 2);
    assert!(realm.has_role(&user, &role));
    // Names collapse to a set.
    assert_eq!(realm.role_names(&user).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unresolved_role_name_is_never_held() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    let user = realm.create_user("alice").await.unwrap();
    assert!(!realm.has_role_named(&user, "no-such-role").await.unwrap());
}

#[tokio::test]
async fn tampered_role_ids_do_not_leak_foreign_names() {
    let store = Arc::new(MemoryStore::new());
    let acme = manager(&store, "acme").await;
    let globex = manager(&store, "globex").await;

    let mut user = acme.create_user("alice").await.unwrap();
    let own_role = acme.create_role("admin").await.unwrap();
    acme.grant_role(&mut user, &own_role).await.unwrap();

    // Simulate a corrupted identifier list pointing across realms.
    let foreign_role = globex.create_role("overlord").await.unwrap();
    store
        .push_to_list(
            &mut user,
            user_fields::ROLE_IDS,
            FieldValue::Id(foreign_role.oid.unwrap()),
        )
        .await
        .unwrap();

    let names = acme.role_names(&user).await.unwrap();
    assert!(names.contains("admin"));
    assert!(!names.contains("overlord"));
}

#[tokio::test]
async fn scope_grants_require_an_existing_role() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;

    let mut agent = realm.create_user("service").await.unwrap();
    let err = realm.add_scope(&mut agent, "missing").await.unwrap_err();
    assert!(matches!(err, RealmError::RoleNotFound(_)));

    realm.create_role("read-only").await.unwrap();
    realm.add_scope(&mut agent, "read-only").await.unwrap();
    let scopes = realm.scope_names(&agent).await.unwrap();
    assert_eq!(scopes, HashSet::from(["read-only".to_string()]));
}

#[tokio::test]
async fn realm_admins_append_without_dedup() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    let admin = realm.create_user("root").await.unwrap();
    let bystander = realm.create_user("bob").await.unwrap();

    assert!(!realm.is_realm_admin(&admin));
    realm.add_realm_admin(&admin).await.unwrap();
    realm.add_realm_admin(&admin).await.unwrap();

    assert!(realm.is_realm_admin(&admin));
    assert!(!realm.is_realm_admin(&bystander));
    assert_eq!(realm.record().admin_user_ids.len(), 2);
}

#[tokio::test]
async fn password_update_and_validation_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;
    let user = realm.create_user("alice").await.unwrap();

    // No stored password yet.
    assert!(!realm.validate_password(&user, "s3cret").await.unwrap());

    realm
        .update_credential(&user, &CredentialInput::password("s3cret"))
        .await
        .unwrap();

    assert!(realm.validate_password(&user, "s3cret").await.unwrap());
    assert!(!realm.validate_password(&user, "wrong").await.unwrap());
}

#[tokio::test]
async fn totp_validation_always_fails() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;
    let user = realm.create_user("alice").await.unwrap();

    realm
        .update_credential(
            &user,
            &CredentialInput::totp("JBSWY3DPEHPK3PXP", Some("phone".to_string())),
        )
        .await
        .unwrap();

    assert!(!realm.validate_totp(&user, "s3cret", "123456").await.unwrap());
}

#[tokio::test]
async fn unsupported_credential_updates_are_no_ops() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;
    let user = realm.create_user("alice").await.unwrap();

    let cert = CredentialInput {
        kind: CredentialKind::ClientCert,
        value: "-----BEGIN CERTIFICATE-----".to_string(),
        device: None,
    };
    realm.update_credential(&user, &cert).await.unwrap();

    let secret = CredentialInput {
        kind: CredentialKind::Secret,
        value: "shhh".to_string(),
        device: None,
    };
    realm.update_credential(&user, &secret).await.unwrap();
}

#[tokio::test]
async fn social_links_bind_resolve_and_remove() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;
    let user = realm.create_user("alice").await.unwrap();

    let google = SocialLink::new("google", "alice@example.com");
    let github = SocialLink::new("github", "alice");
    realm.add_social_link(&user, &google).await.unwrap();
    realm.add_social_link(&user, &github).await.unwrap();

    let links = realm.social_links(&user).await.unwrap();
    assert_eq!(links.len(), 2);
    assert!(links.contains(&google));

    let resolved = realm.user_by_social_link(&google).await.unwrap().unwrap();
    assert_eq!(resolved.oid, user.oid);

    let removed = realm.remove_social_link(&user, &google).await.unwrap();
    assert_eq!(removed, 1);
    assert!(realm.user_by_social_link(&google).await.unwrap().is_none());
    assert_eq!(realm.social_links(&user).await.unwrap().len(), 1);
}

#[tokio::test]
async fn social_links_are_realm_scoped() {
    let store = Arc::new(MemoryStore::new());
    let acme = manager(&store, "acme").await;
    let globex = manager(&store, "globex").await;

    let user = acme.create_user("alice").await.unwrap();
    let link = SocialLink::new("google", "alice@example.com");
    acme.add_social_link(&user, &link).await.unwrap();

    assert!(acme.user_by_social_link(&link).await.unwrap().is_some());
    assert!(globex.user_by_social_link(&link).await.unwrap().is_none());
}

#[tokio::test]
async fn dangling_social_link_reads_as_absent() {
    let store = Arc::new(MemoryStore::new());
    let realm = manager(&store, "acme").await;
    let user = realm.create_user("alice").await.unwrap();

    let link = SocialLink::new("google", "alice@example.com");
    realm.add_social_link(&user, &link).await.unwrap();
    store.remove(&user).await.unwrap();

    assert!(realm.user_by_social_link(&link).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_user_is_realm_scoped() {
    let store = Arc::new(MemoryStore::new());
    let acme = manager(&store, "acme").await;
    let globex = manager(&store, "globex").await;

    acme.create_user("alice").await.unwrap();
    globex.create_user("alice").await.unwrap();

    assert_eq!(acme.remove_user("alice").await.unwrap(), 1);
    assert!(acme.user("alice").await.unwrap().is_none());
    assert!(globex.user("alice").await.unwrap().is_some());
}

#[tokio::test]
async fn field_setters_persist_the_whole_realm() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    realm.set_name("acme-renamed").await.unwrap();
    realm.set_registration_allowed(true).await.unwrap();
    realm.set_token_lifespan_secs(900).await.unwrap();

    let stored: RealmRecord = store.load(realm.oid()).await.unwrap().unwrap();
    assert_eq!(stored.name, "acme-renamed");
    assert!(stored.registration_allowed);
    assert_eq!(stored.token_lifespan_secs, 900);
}

#[tokio::test]
async fn public_key_pem_replacement_invalidates_the_cache() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    realm
        .set_public_key_pem(STANDARD.encode(DER_A))
        .await
        .unwrap();
    let first = realm.public_key().unwrap().unwrap();
    assert_eq!(first.as_der(), DER_A);

    realm
        .set_public_key_pem(STANDARD.encode(DER_B))
        .await
        .unwrap();
    let second = realm.public_key().unwrap().unwrap();
    assert_eq!(second.as_der(), DER_B);
}

#[tokio::test]
async fn storing_a_decoded_key_writes_the_pem_body() {
    let store = Arc::new(MemoryStore::new());
    let mut realm = manager(&store, "acme").await;

    let key = DerPublicKey::from_der(DER_A.to_vec()).unwrap();
    realm.set_public_key(key).await.unwrap();

    assert_eq!(realm.public_key_pem(), Some(STANDARD.encode(DER_A).as_str()));
    let stored: RealmRecord = store.load(realm.oid()).await.unwrap().unwrap();
    assert_eq!(stored.public_key_pem, Some(STANDARD.encode(DER_A)));

    // The cache serves the key without re-decoding.
    let decoded = realm.public_key().unwrap().unwrap();
    assert_eq!(decoded.as_der(), DER_A);
}

#[tokio::test]
async fn unsaved_realm_is_rejected_at_construction() {
    let store = Arc::new(MemoryStore::new());
    let realm = RealmRecord::new("floating");

    let result = RealmManager::new(realm, Arc::clone(&store), handlers());
    assert!(matches!(
        result.err(),
        Some(RealmError::NotPersisted("realm"))
    ));
}
