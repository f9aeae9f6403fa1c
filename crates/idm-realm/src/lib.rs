//! # idm-realm
//!
//! The realm aggregate manager: realm-scoped lifecycle operations for
//! users, roles, applications, required-credential policy, and social
//! links, with the cross-entity invariants enforced in one place.
//!
//! ## Components
//!
//! - [`RealmManager`]: the aggregate root and the only writer of
//!   realm-scoped entities
//! - [`keys::KeyPairCache`]: lazily decoded per-realm key material
//! - [`reconcile`]: pure add/remove delta over required-credential
//!   declarations
//! - [`rbac`]: membership checks over identifier lists
//!
//! ## Consistency model
//!
//! Operations are sequential round trips to the persistence port. The
//! only multi-writer-safe write is the port's atomic list append (role
//! and scope grants, default-role and admin appends). Compound
//! workflows (application creation, credential-set reconciliation,
//! default-role replacement) have no compensating rollback: a storage
//! failure partway leaves the completed steps committed. Callers that
//! need stricter guarantees must bring a transactional port.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod keys;
pub mod manager;
pub mod rbac;
pub mod reconcile;

pub use error::{RealmError, RealmResult};
pub use keys::KeyPairCache;
pub use manager::RealmManager;
