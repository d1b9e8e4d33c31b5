//! linkkeeper core library
//!
//! This crate provides the core functionality for linkkeeper, a
//! local-first personal bookmark manager: a validated in-memory
//! collection of links persisted as a single JSON blob.
//!
//! # Architecture
//!
//! All queries are served from the in-memory collection; every mutating
//! operation rederives the category set and rewrites the blob before it
//! returns. Loading is fail-soft: a missing or malformed blob simply
//! means an empty collection.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a link
//! let link = store.create(LinkDraft {
//!     title: "Example".into(),
//!     url: "https://example.com".into(),
//!     category: "Docs".into(),
//!     ..Default::default()
//! })?;
//!
//! // Query links
//! let links = store.query(&LinkFilter::default());
//! ```
//!
//! # Modules
//!
//! - `store`: persistence-coordinating entry point
//! - `collection`: in-memory collection, sanitization, merge, query
//! - `models`: data structures for links and drafts
//! - `urls`: URL validity gate and display formatting
//! - `storage`: JSON blob persistence
//! - `config`: application configuration
//! - `seed`: first-run sample data

pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;
pub mod urls;

pub use collection::{sanitize_link, CategoryFilter, Collection, LinkFilter};
pub use config::Config;
pub use error::{StoreError, StoreResult, ValidationError};
pub use models::{Link, LinkDraft, LinkImage, UNCATEGORIZED};
pub use storage::{JsonPersistence, StorageError};
pub use store::Store;
pub use urls::{format_display_url, is_valid_http_url};
