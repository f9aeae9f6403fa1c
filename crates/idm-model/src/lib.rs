//! # idm-model
//!
//! Domain records for the multi-tenant identity core.
//!
//! Every entity is a serde document with a store-assigned object
//! identifier (`oid`). Records carry the query field names used by the
//! persistence port as `fields` constants, so callers never spell a
//! field name twice.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod application;
pub mod credential;
pub mod realm;
pub mod required_credential;
pub mod role;
pub mod social_link;
pub mod user;

pub use application::ApplicationRecord;
pub use credential::{CredentialInput, CredentialKind, StoredCredentialRecord};
pub use realm::RealmRecord;
pub use required_credential::{
    ClientKind, CredentialTemplate, RequiredCredential, RequiredCredentialRecord,
};
pub use role::RoleRecord;
pub use social_link::{SocialLink, SocialLinkRecord};
pub use user::UserRecord;
