//! Storage layer
//!
//! Handles the persisted collection blob: a single JSON document written
//! with atomic file operations so the blob is never left half-written.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
