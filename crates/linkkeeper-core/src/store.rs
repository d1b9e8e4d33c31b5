//! Unified store interface
//!
//! The `Store` owns the in-memory collection and coordinates
//! persistence: every mutation rederives the category set and rewrites
//! the blob before the call returns. A missing or malformed blob means
//! the store starts empty; it is never fatal.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let link = store.create(LinkDraft {
//!     title: "Example".into(),
//!     url: "https://example.com".into(),
//!     category: "Docs".into(),
//!     ..Default::default()
//! })?;
//!
//! let links = store.query(&LinkFilter::default());
//! ```

use anyhow::{Context, Result};
use tracing::debug;

use crate::collection::{Collection, LinkFilter};
use crate::config::Config;
use crate::error::StoreResult;
use crate::models::{Link, LinkDraft};
use crate::seed;
use crate::storage::JsonPersistence;

/// Unified store interface for linkkeeper
///
/// Holds the validated collection and rewrites the persisted blob after
/// every mutating operation.
pub struct Store {
    /// The in-memory collection
    collection: Collection,
    /// Blob persistence handler
    persistence: JsonPersistence,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config).context("Failed to open store")
    }

    /// Open the store with a specific configuration
    ///
    /// A missing blob, an unreadable-as-JSON blob, or a blob with the
    /// wrong shape all yield an empty collection.
    pub fn open_with_config(config: Config) -> StoreResult<Self> {
        let persistence = JsonPersistence::new(config);
        let collection = match persistence.load()? {
            Some(raw) => Collection::from_json(&raw),
            None => Collection::default(),
        };

        Ok(Self {
            collection,
            persistence,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.persistence.config()
    }

    /// Check if the store holds no links yet
    pub fn is_new(&self) -> bool {
        self.collection.is_empty()
    }

    /// Populate an empty store with sample links
    ///
    /// Does nothing when the store already has links.
    pub fn ensure_seed_data(&mut self) -> StoreResult<()> {
        if !self.is_new() {
            return Ok(());
        }
        for link in seed::sample_links() {
            self.collection.add(link);
        }
        self.save()
    }

    // ==================== Mutations ====================

    /// Create a link from draft fields
    ///
    /// The draft is trimmed and field-validated; the new link gets a
    /// fresh id and `created_at == updated_at == now`.
    pub fn create(&mut self, draft: LinkDraft) -> StoreResult<Link> {
        let draft = draft.trimmed();
        draft.validate()?;

        let link = Link::new(draft);
        self.collection.add(link.clone());
        self.save()?;
        Ok(link)
    }

    /// Replace the mutable fields of an existing link
    ///
    /// `id` and `created_at` are preserved, `updated_at` is refreshed.
    /// Fails with `NotFound` when no link has the id.
    pub fn update(&mut self, id: &str, draft: LinkDraft) -> StoreResult<Link> {
        let draft = draft.trimmed();
        draft.validate()?;

        let link = self.collection.update(id, draft)?;
        self.save()?;
        Ok(link)
    }

    /// Delete a link; a missing id is a harmless no-op
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        if self.collection.remove(id) {
            self.save()?;
        } else {
            debug!(id, "delete: no such link");
        }
        Ok(())
    }

    /// Merge an imported payload, returning the number of appended links
    ///
    /// On any import error the collection and the blob are unchanged.
    pub fn merge_import(&mut self, raw: &str) -> StoreResult<usize> {
        let count = self.collection.merge_import(raw)?;
        self.save()?;
        Ok(count)
    }

    // ==================== Queries ====================

    /// Get a link by id
    pub fn get(&self, id: &str) -> Option<&Link> {
        self.collection.get(id)
    }

    /// All links in storage order
    pub fn links(&self) -> &[Link] {
        self.collection.links()
    }

    /// Links matching `filter`, newest-created first
    pub fn query(&self, filter: &LinkFilter) -> Vec<Link> {
        self.collection.query(filter)
    }

    /// Derived categories in presentation order
    pub fn categories(&self) -> Vec<String> {
        self.collection.sorted_categories()
    }

    /// Get count of links
    pub fn link_count(&self) -> usize {
        self.collection.len()
    }

    /// Pretty-printed export of the whole collection
    pub fn export_json(&self) -> StoreResult<String> {
        self.collection.export_json()
    }

    /// Serialize and rewrite the persisted blob
    fn save(&mut self) -> StoreResult<()> {
        let raw = self.collection.to_json()?;
        self.persistence.save(&raw)?;
        Ok(())
    }
}
