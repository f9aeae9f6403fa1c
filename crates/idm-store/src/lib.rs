//! # idm-store
//!
//! Persistence port for the identity core: a generic document store
//! keyed by store-assigned object identifiers, queryable by equality
//! and membership conditions, with an atomic append-to-list-field
//! primitive.
//!
//! The port is deliberately narrow: it is the only contract the realm
//! aggregate manager relies on. A production backend would sit behind
//! [`DocumentStore`] exactly like the bundled [`MemoryStore`] does.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod criteria;
pub mod document;
pub mod error;
pub mod memory;

pub use criteria::{Criteria, FieldValue};
pub use document::{Document, DocumentStore, OID_FIELD};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
