//! Error types for the link store
//!
//! A malformed persisted blob and individually invalid records are not
//! errors: they are recovered locally (empty collection, dropped record)
//! and logged. Only outcomes the caller must react to are typed here.

use thiserror::Error;

use crate::storage::StorageError;

/// Field-level validation failures, surfaced per-field at the form boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("'{0}' is not a valid http(s) URL")]
    InvalidUrl(String),

    #[error("a category is required")]
    EmptyCategory,

    #[error("image URL '{0}' is not a valid http(s) URL")]
    InvalidImageUrl(String),
}

/// Errors returned by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No link with the requested id
    #[error("link not found: {id}")]
    NotFound { id: String },

    /// Import payload is not an object with a `links` array
    #[error("invalid import format: {0}")]
    InvalidFormat(String),

    /// Import payload contained no admissible links
    #[error("no valid links found in import file")]
    NoValidRecords,

    /// Nothing to export
    #[error("there are no links to export")]
    EmptyCollection,

    /// A draft failed field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying blob storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Serializing the collection failed
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
