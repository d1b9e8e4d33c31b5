//! Data models for linkkeeper
//!
//! Defines the core data structures: Link, LinkImage, and LinkDraft.
//! Links use camelCase field names on the wire to match the persisted
//! blob and import/export layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::urls::is_valid_http_url;

/// Category label applied when a record carries none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A saved link with metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Unique identifier (UUID v4 text when generated here; any
    /// non-empty id found in a loaded blob is preserved)
    pub id: String,
    /// Display title
    pub title: String,
    /// The URL (http or https)
    pub url: String,
    /// Category label
    pub category: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Optional thumbnail reference
    #[serde(default)]
    pub image: Option<LinkImage>,
    /// When this link was created
    pub created_at: DateTime<Utc>,
    /// When this link was last updated
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Create a new link from validated draft fields
    pub fn new(draft: LinkDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            url: draft.url,
            category: draft.category,
            description: draft.description,
            image: draft.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields, preserving `id` and `created_at`
    pub fn apply(&mut self, draft: LinkDraft) {
        self.title = draft.title;
        self.url = draft.url;
        self.category = draft.category;
        self.description = draft.description;
        self.image = draft.image;
        self.updated_at = Utc::now();
    }

    /// Text searched by the query filter: title, url and description
    pub(crate) fn haystack(&self) -> String {
        format!("{} {} {}", self.title, self.url, self.description).to_lowercase()
    }
}

/// Thumbnail reference attached to a link
///
/// Either a remote image URL or an inline base64-encoded payload
/// (a `data:` URL). Serialized as `{"type": "url"|"base64", "value": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum LinkImage {
    /// Remote image URL
    Url(String),
    /// Inline base64 payload
    Base64(String),
}

impl LinkImage {
    /// The text payload, regardless of variant
    pub fn value(&self) -> &str {
        match self {
            LinkImage::Url(value) | LinkImage::Base64(value) => value,
        }
    }
}

/// Field values for creating or updating a link
///
/// Drafts come from an interactive boundary (a form, CLI flags) and are
/// validated field by field before they reach the collection. The store
/// re-runs `validate`, so a careless caller cannot break the collection
/// invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub category: String,
    pub description: String,
    pub image: Option<LinkImage>,
}

impl LinkDraft {
    /// Trim all text fields, the way a form boundary would
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image,
        }
    }

    /// Field-level validation
    ///
    /// Expects already-trimmed values; returns the first failing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !is_valid_http_url(&self.url) {
            return Err(ValidationError::InvalidUrl(self.url.clone()));
        }
        if self.category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if let Some(LinkImage::Url(value)) = &self.image {
            if !is_valid_http_url(value) {
                return Err(ValidationError::InvalidImageUrl(value.clone()));
            }
        }
        Ok(())
    }
}
