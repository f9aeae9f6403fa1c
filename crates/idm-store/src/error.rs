//! Store error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the persistence port.
///
/// The aggregate manager propagates these unwrapped and never retries;
/// a failure mid-workflow leaves previously completed steps committed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record has no object identifier yet (never saved).
    #[error("record in '{collection}' is not persisted yet")]
    Detached {
        /// Collection the record belongs to.
        collection: &'static str,
    },

    /// The record disappeared between load and update.
    #[error("record {oid} no longer exists in '{collection}'")]
    Missing {
        /// Collection the record belongs to.
        collection: &'static str,
        /// Object identifier that failed to resolve.
        oid: Uuid,
    },

    /// A document failed to (de)serialize.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend failure (connection, query, I/O).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a serialization error from any serde error.
    #[must_use]
    pub fn serialization(err: impl std::fmt::Display) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
