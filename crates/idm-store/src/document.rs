//! Document trait and the store port.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use idm_model::{
    ApplicationRecord, RealmRecord, RequiredCredentialRecord, RoleRecord, SocialLinkRecord,
    StoredCredentialRecord, UserRecord,
};

use crate::criteria::{Criteria, FieldValue};
use crate::error::StoreResult;

/// Serialized field name of the object identifier on every document.
pub const OID_FIELD: &str = "oid";

/// A record the store can persist.
///
/// Documents serialize to flat JSON objects; the criteria language
/// addresses their serialized field names.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Collection the record lives in.
    const COLLECTION: &'static str;

    /// Store-assigned object identifier, if the record was ever saved.
    fn oid(&self) -> Option<Uuid>;

    /// Sets the object identifier. Called by the store on first save.
    fn set_oid(&mut self, oid: Uuid);
}

macro_rules! impl_document {
    ($ty:ty, $collection:literal) => {
        impl Document for $ty {
            const COLLECTION: &'static str = $collection;

            fn oid(&self) -> Option<Uuid> {
                self.oid
            }

            fn set_oid(&mut self, oid: Uuid) {
                self.oid = Some(oid);
            }
        }
    };
}

impl_document!(RealmRecord, "realms");
impl_document!(UserRecord, "users");
impl_document!(RoleRecord, "roles");
impl_document!(ApplicationRecord, "applications");
impl_document!(RequiredCredentialRecord, "required_credentials");
impl_document!(SocialLinkRecord, "social_links");
impl_document!(StoredCredentialRecord, "credentials");

/// The persistence port.
///
/// Implementations must be thread-safe. The only multi-writer-safe
/// primitive is [`push_to_list`](DocumentStore::push_to_list); all
/// other writes are last-writer-wins on the whole record, and no
/// operation spans more than one record atomically.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads a record by object identifier.
    async fn load<T: Document>(&self, oid: Uuid) -> StoreResult<Option<T>>;

    /// Returns the first record matching the criteria, if any.
    async fn find_one<T: Document>(&self, criteria: Criteria) -> StoreResult<Option<T>>;

    /// Returns all records matching the criteria.
    async fn find_all<T: Document>(&self, criteria: Criteria) -> StoreResult<Vec<T>>;

    /// Inserts or updates a record by identifier.
    ///
    /// On insert the store assigns a fresh object identifier and writes
    /// it back into the record.
    async fn save<T: Document>(&self, record: &mut T) -> StoreResult<()>;

    /// Deletes a record.
    ///
    /// ## Errors
    ///
    /// Returns [`StoreError::Detached`](crate::StoreError::Detached) if
    /// the record was never saved.
    async fn remove<T: Document>(&self, record: &T) -> StoreResult<()>;

    /// Deletes all records matching the criteria; returns the count.
    async fn remove_all<T: Document>(&self, criteria: Criteria) -> StoreResult<u64>;

    /// Atomically appends a value to a list field of a stored record.
    ///
    /// Atomic at the single-record level. The caller's copy is
    /// rehydrated with the post-append state of the stored record, so
    /// in-memory identifier lists stay in step with storage.
    ///
    /// ## Errors
    ///
    /// Returns [`StoreError::Detached`](crate::StoreError::Detached) if
    /// the record was never saved, and
    /// [`StoreError::Missing`](crate::StoreError::Missing) if it has
    /// been deleted since.
    async fn push_to_list<T: Document>(
        &self,
        record: &mut T,
        field: &'static str,
        value: FieldValue,
    ) -> StoreResult<()>;
}
