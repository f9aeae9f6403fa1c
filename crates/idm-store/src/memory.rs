//! In-memory document store.
//!
//! Collections are `BTreeMap`s of serialized documents behind a single
//! `RwLock`, which gives deterministic iteration order (v7 identifiers
//! sort by creation time) and makes the read-modify-write inside
//! [`push_to_list`](crate::DocumentStore::push_to_list) atomic.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::criteria::{Criteria, FieldValue};
use crate::document::{Document, DocumentStore};
use crate::error::{StoreError, StoreResult};

type Collection = BTreeMap<Uuid, Value>;

/// In-memory [`DocumentStore`] backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn to_value<T: Document>(record: &T) -> StoreResult<Value> {
        serde_json::to_value(record).map_err(StoreError::serialization)
    }

    fn from_value<T: Document>(value: Value) -> StoreResult<T> {
        serde_json::from_value(value).map_err(StoreError::serialization)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load<T: Document>(&self, oid: Uuid) -> StoreResult<Option<T>> {
        let collections = self.collections.read();
        let Some(collection) = collections.get(T::COLLECTION) else {
            return Ok(None);
        };
        collection
            .get(&oid)
            .cloned()
            .map(Self::from_value)
            .transpose()
    }

    async fn find_one<T: Document>(&self, criteria: Criteria) -> StoreResult<Option<T>> {
        let collections = self.collections.read();
        let Some(collection) = collections.get(T::COLLECTION) else {
            return Ok(None);
        };
        collection
            .values()
            .find(|doc| criteria.matches(doc))
            .cloned()
            .map(Self::from_value)
            .transpose()
    }

    async fn find_all<T: Document>(&self, criteria: Criteria) -> StoreResult<Vec<T>> {
        let collections = self.collections.read();
        let Some(collection) = collections.get(T::COLLECTION) else {
            return Ok(Vec::new());
        };
        collection
            .values()
            .filter(|doc| criteria.matches(doc))
            .cloned()
            .map(Self::from_value)
            .collect()
    }

    async fn save<T: Document>(&self, record: &mut T) -> StoreResult<()> {
        if record.oid().is_none() {
            record.set_oid(Uuid::now_v7());
        }
        let oid = record.oid().ok_or(StoreError::Detached {
            collection: T::COLLECTION,
        })?;
        let value = Self::to_value(record)?;

        let mut collections = self.collections.write();
        collections
            .entry(T::COLLECTION)
            .or_default()
            .insert(oid, value);
        Ok(())
    }

    async fn remove<T: Document>(&self, record: &T) -> StoreResult<()> {
        let oid = record.oid().ok_or(StoreError::Detached {
            collection: T::COLLECTION,
        })?;
        let mut collections = self.collections.write();
        if let Some(collection) = collections.get_mut(T::COLLECTION) {
            collection.remove(&oid);
        }
        Ok(())
    }

    async fn remove_all<T: Document>(&self, criteria: Criteria) -> StoreResult<u64> {
        let mut collections = self.collections.write();
        let Some(collection) = collections.get_mut(T::COLLECTION) else {
            return Ok(0);
        };
        let doomed: Vec<Uuid> = collection
            .iter()
            .filter(|(_, doc)| criteria.matches(doc))
            .map(|(oid, _)| *oid)
            .collect();
        for oid in &doomed {
            collection.remove(oid);
        }
        Ok(doomed.len() as u64)
    }

    async fn push_to_list<T: Document>(
        &self,
        record: &mut T,
        field: &'static str,
        value: FieldValue,
    ) -> StoreResult<()> {
        let oid = record.oid().ok_or(StoreError::Detached {
            collection: T::COLLECTION,
        })?;

        // Write lock held across read-modify-write: the append is
        // atomic with respect to other writers of this record.
        let mut collections = self.collections.write();
        let stored = collections
            .get_mut(T::COLLECTION)
            .and_then(|c| c.get_mut(&oid))
            .ok_or(StoreError::Missing {
                collection: T::COLLECTION,
                oid,
            })?;

        match stored.get_mut(field) {
            Some(Value::Array(items)) => items.push(value.to_json()),
            Some(_) => {
                return Err(StoreError::Backend(format!(
                    "field '{field}' of '{}' is not a list",
                    T::COLLECTION
                )));
            }
            None => {
                stored
                    .as_object_mut()
                    .ok_or_else(|| {
                        StoreError::Backend(format!("document in '{}' is not an object", T::COLLECTION))
                    })?
                    .insert(field.to_string(), Value::Array(vec![value.to_json()]));
            }
        }

        *record = Self::from_value(stored.clone())?;
        Ok(())
    }
}
