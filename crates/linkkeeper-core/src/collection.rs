//! In-memory link collection
//!
//! The collection is the single authority for turning arbitrary external
//! input into trustworthy state: every link it holds has passed the
//! admission gate (non-empty title, http/https URL). Loading is
//! fail-soft (a malformed blob yields an empty collection) and the
//! category list is always rederived from the links, never trusted from
//! input.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Link, LinkDraft, LinkImage, UNCATEGORIZED};
use crate::urls::is_valid_http_url;

/// Category side of a query filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Match every category
    #[default]
    All,
    /// Match one category exactly
    Category(String),
}

/// Query filter: a category plus free-text search
///
/// The search text matches case-insensitively against the concatenation
/// of title, URL and description.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    pub category: CategoryFilter,
    pub search: String,
}

/// Persisted blob and export layout
///
/// `categories` is written for external readability; it is rederived on
/// every load and never trusted.
#[derive(Serialize)]
struct Payload<'a> {
    links: &'a [Link],
    categories: &'a [String],
}

/// The in-memory collection of links and derived categories
#[derive(Debug, Clone, Default)]
pub struct Collection {
    links: Vec<Link>,
    categories: Vec<String>,
}

impl Collection {
    /// Parse a persisted blob
    ///
    /// Malformed input yields an empty collection; individually invalid
    /// records are dropped. Never fails.
    pub fn from_json(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("stored collection is not valid JSON, starting empty: {err}");
                return Self::default();
            }
        };
        let Some(entries) = value.get("links").and_then(Value::as_array) else {
            warn!("stored collection has no links array, starting empty");
            return Self::default();
        };

        let mut collection = Self::default();
        for entry in entries {
            match sanitize_link(entry) {
                Some(link) => collection.links.push(link),
                None => debug!("dropped invalid link record on load"),
            }
        }
        collection.recalculate_categories();
        collection
    }

    /// Serialized form written to the blob store
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(&Payload {
            links: &self.links,
            categories: &self.categories,
        })?)
    }

    /// Pretty-printed export of the whole collection
    pub fn export_json(&self) -> StoreResult<String> {
        if self.links.is_empty() {
            return Err(StoreError::EmptyCollection);
        }
        Ok(serde_json::to_string_pretty(&Payload {
            links: &self.links,
            categories: &self.categories,
        })?)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Derived categories in storage order (insertion order, distinct)
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.id == id)
    }

    /// Append a link and rederive categories
    ///
    /// Callers pass links built from validated drafts; the load and
    /// import paths run the admission gate instead.
    pub fn add(&mut self, link: Link) {
        self.links.push(link);
        self.recalculate_categories();
    }

    /// Replace the mutable fields of the link with `id`
    pub fn update(&mut self, id: &str, draft: LinkDraft) -> StoreResult<Link> {
        let link = self
            .links
            .iter_mut()
            .find(|link| link.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        link.apply(draft);
        let updated = link.clone();
        self.recalculate_categories();
        Ok(updated)
    }

    /// Remove the link with `id`; absence is a harmless no-op
    ///
    /// Returns whether a link was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.links.len();
        self.links.retain(|link| link.id != id);
        let removed = self.links.len() != before;
        if removed {
            self.recalculate_categories();
        }
        removed
    }

    /// Rederive the category set from the current links
    ///
    /// Distinct non-empty `category` values; a category whose last link
    /// disappeared is gone after this.
    pub fn recalculate_categories(&mut self) {
        let mut seen = HashSet::new();
        self.categories = self
            .links
            .iter()
            .map(|link| &link.category)
            .filter(|category| !category.is_empty())
            .filter(|category| seen.insert(category.to_string()))
            .cloned()
            .collect();
    }

    /// Categories in presentation order: case-insensitive alphabetical
    pub fn sorted_categories(&self) -> Vec<String> {
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        categories
    }

    /// Links matching `filter`, newest-created first
    ///
    /// The sort is stable, so links with equal timestamps keep their
    /// insertion order.
    pub fn query(&self, filter: &LinkFilter) -> Vec<Link> {
        let needle = filter.search.trim().to_lowercase();
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|link| match &filter.category {
                CategoryFilter::All => true,
                CategoryFilter::Category(category) => link.category == *category,
            })
            .filter(|link| needle.is_empty() || link.haystack().contains(&needle))
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links
    }

    /// Merge an imported payload into the collection
    ///
    /// The payload must be a JSON object with a `links` array. Candidates
    /// pass the same admission gate as loading; a record whose id
    /// collides with an existing link (or with one appended earlier in
    /// the same batch) gets a fresh id; import always appends, never
    /// overwrites. The collection is left untouched unless at least one
    /// record survives.
    pub fn merge_import(&mut self, raw: &str) -> StoreResult<usize> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| StoreError::InvalidFormat(err.to_string()))?;
        if !value.is_object() {
            return Err(StoreError::InvalidFormat(
                "expected a JSON object".to_string(),
            ));
        }
        let entries = value
            .get("links")
            .and_then(Value::as_array)
            .ok_or_else(|| StoreError::InvalidFormat("expected a `links` array".to_string()))?;

        let mut taken: HashSet<String> = self.links.iter().map(|link| link.id.clone()).collect();
        let mut incoming = Vec::new();
        for entry in entries {
            let Some(mut link) = sanitize_link(entry) else {
                debug!("dropped invalid link record on import");
                continue;
            };
            if !taken.insert(link.id.clone()) {
                link.id = Uuid::new_v4().to_string();
                taken.insert(link.id.clone());
            }
            incoming.push(link);
        }

        if incoming.is_empty() {
            return Err(StoreError::NoValidRecords);
        }

        let count = incoming.len();
        self.links.extend(incoming);
        self.recalculate_categories();
        Ok(count)
    }
}

/// Admission gate for a single candidate record
///
/// Coerces fields defensively: a missing or empty id gets a fresh one,
/// text fields are trimmed, an empty category falls back to
/// [`UNCATEGORIZED`], timestamps default to now. The whole record is
/// rejected when the coerced title is empty or the URL is not http/https.
pub fn sanitize_link(value: &Value) -> Option<Link> {
    let record = value.as_object()?;

    let id = trimmed_string(record.get("id")).unwrap_or_else(|| Uuid::new_v4().to_string());
    let title = trimmed_string(record.get("title")).unwrap_or_default();
    let url = trimmed_string(record.get("url")).unwrap_or_default();
    let category =
        trimmed_string(record.get("category")).unwrap_or_else(|| UNCATEGORIZED.to_string());
    let description = trimmed_string(record.get("description")).unwrap_or_default();

    if title.is_empty() || !is_valid_http_url(&url) {
        return None;
    }

    Some(Link {
        id,
        title,
        url,
        category,
        description,
        image: sanitize_image(record.get("image")),
        created_at: parse_timestamp(record.get("createdAt")),
        updated_at: parse_timestamp(record.get("updatedAt")),
    })
}

/// Non-empty trimmed string, or nothing
fn trimmed_string(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Image objects must carry a known `type` and a non-empty `value`
fn sanitize_image(value: Option<&Value>) -> Option<LinkImage> {
    let record = value?.as_object()?;
    let kind = record.get("type")?.as_str()?;
    let payload = record.get("value")?.as_str()?.trim();
    if payload.is_empty() {
        return None;
    }
    match kind {
        "url" => Some(LinkImage::Url(payload.to_string())),
        "base64" => Some(LinkImage::Base64(payload.to_string())),
        _ => None,
    }
}

/// Parse an RFC 3339 timestamp, substituting the current time when the
/// value is missing or unparsable
fn parse_timestamp(value: Option<&Value>) -> DateTime<Utc> {
    value
        .and_then(Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, title: &str, url: &str, category: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "url": url,
            "category": category,
            "description": "",
            "image": null,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        })
    }

    fn loaded(entries: &[Value]) -> Collection {
        Collection::from_json(&json!({ "links": entries, "categories": [] }).to_string())
    }

    #[test]
    fn test_admission_gate() {
        // accepted: non-empty title, http(s) url
        assert!(sanitize_link(&record("1", "A", "https://x.com", "C")).is_some());
        assert!(sanitize_link(&record("1", "A", "http://x.com", "C")).is_some());

        // rejected: empty title or non-http(s) url
        assert!(sanitize_link(&record("1", "", "https://x.com", "C")).is_none());
        assert!(sanitize_link(&record("1", "   ", "https://x.com", "C")).is_none());
        assert!(sanitize_link(&record("1", "A", "ftp://x.com", "C")).is_none());
        assert!(sanitize_link(&record("1", "A", "not a url", "C")).is_none());

        // rejected: not an object at all
        assert!(sanitize_link(&json!("just a string")).is_none());
        assert!(sanitize_link(&json!(null)).is_none());
        assert!(sanitize_link(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_sanitize_coerces_fields() {
        let link = sanitize_link(&json!({
            "id": "  keep-me  ",
            "title": "  Padded  ",
            "url": "https://x.com",
            "category": "",
            "description": 42,
            "image": {"type": "unknown", "value": "x"},
            "createdAt": "not a date",
        }))
        .unwrap();

        assert_eq!(link.id, "keep-me");
        assert_eq!(link.title, "Padded");
        assert_eq!(link.category, UNCATEGORIZED);
        assert_eq!(link.description, "");
        assert!(link.image.is_none());
    }

    #[test]
    fn test_sanitize_generates_id_when_missing() {
        let link = sanitize_link(&json!({
            "title": "A",
            "url": "https://x.com",
        }))
        .unwrap();
        assert!(!link.id.is_empty());
    }

    #[test]
    fn test_sanitize_image_variants() {
        let with = |image: Value| {
            let mut entry = record("1", "A", "https://x.com", "C");
            entry["image"] = image;
            sanitize_link(&entry).unwrap().image
        };

        assert_eq!(
            with(json!({"type": "url", "value": " https://x.com/a.png "})),
            Some(LinkImage::Url("https://x.com/a.png".to_string()))
        );
        assert_eq!(
            with(json!({"type": "base64", "value": "data:image/png;base64,AA"})),
            Some(LinkImage::Base64("data:image/png;base64,AA".to_string()))
        );
        assert_eq!(with(json!({"type": "url", "value": "   "})), None);
        assert_eq!(with(json!({"type": "svg", "value": "x"})), None);
        assert_eq!(with(json!("https://x.com/a.png")), None);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let first = sanitize_link(&record("1", "A", "https://x.com", "C")).unwrap();
        let second = sanitize_link(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_json_fails_soft() {
        assert!(Collection::from_json("not json at all").is_empty());
        assert!(Collection::from_json("[1,2,3]").is_empty());
        assert!(Collection::from_json("{\"links\": 7}").is_empty());
        assert!(Collection::from_json("{}").is_empty());
    }

    #[test]
    fn test_from_json_drops_invalid_records() {
        let collection = loaded(&[
            record("1", "Good", "https://x.com", "C"),
            record("2", "", "https://x.com", "C"),
            record("3", "Bad url", "nope", "C"),
            json!(null),
        ]);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.links()[0].title, "Good");
    }

    #[test]
    fn test_roundtrip_preserves_links() {
        let collection = loaded(&[
            record("1", "One", "https://one.com", "A"),
            record("2", "Two", "https://two.com", "B"),
        ]);
        let reloaded = Collection::from_json(&collection.to_json().unwrap());

        assert_eq!(reloaded.links(), collection.links());
        assert_eq!(reloaded.categories(), collection.categories());
    }

    #[test]
    fn test_category_derivation() {
        let mut collection = loaded(&[
            record("1", "One", "https://one.com", "Docs"),
            record("2", "Two", "https://two.com", "News"),
            record("3", "Three", "https://three.com", "Docs"),
        ]);
        assert_eq!(collection.categories(), ["Docs", "News"]);

        // deleting the last link of a category removes it
        collection.remove("2");
        assert_eq!(collection.categories(), ["Docs"]);
    }

    #[test]
    fn test_sorted_categories_case_insensitive() {
        let collection = loaded(&[
            record("1", "One", "https://one.com", "news"),
            record("2", "Two", "https://two.com", "Articles"),
            record("3", "Three", "https://three.com", "blogs"),
        ]);
        assert_eq!(collection.sorted_categories(), ["Articles", "blogs", "news"]);
    }

    #[test]
    fn test_update_not_found() {
        let mut collection = Collection::default();
        let result = collection.update("missing", LinkDraft::default());
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut collection = loaded(&[record("1", "One", "https://one.com", "A")]);
        assert!(!collection.remove("missing"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_query_sorts_newest_first() {
        let mut older = record("1", "Older", "https://one.com", "A");
        older["createdAt"] = json!("2023-01-01T00:00:00Z");
        let mut newer = record("2", "Newer", "https://two.com", "A");
        newer["createdAt"] = json!("2024-01-01T00:00:00Z");

        let collection = loaded(&[older, newer]);
        let links = collection.query(&LinkFilter::default());
        assert_eq!(links[0].title, "Newer");
        assert_eq!(links[1].title, "Older");
    }

    #[test]
    fn test_query_ties_keep_insertion_order() {
        let collection = loaded(&[
            record("1", "First", "https://one.com", "A"),
            record("2", "Second", "https://two.com", "A"),
            record("3", "Third", "https://three.com", "A"),
        ]);
        let titles: Vec<_> = collection
            .query(&LinkFilter::default())
            .into_iter()
            .map(|link| link.title)
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_query_filters_by_category_and_search() {
        let mut with_desc = record("3", "Third", "https://three.com", "News");
        with_desc["description"] = json!("weekly RUST digest");
        let collection = loaded(&[
            record("1", "Rust book", "https://doc.rust-lang.org", "Docs"),
            record("2", "Dribbble", "https://dribbble.com", "Design"),
            with_desc,
        ]);

        let docs = collection.query(&LinkFilter {
            category: CategoryFilter::Category("Docs".to_string()),
            search: String::new(),
        });
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Rust book");

        // search is case-insensitive over title, url and description
        let rust = collection.query(&LinkFilter {
            category: CategoryFilter::All,
            search: "rust".to_string(),
        });
        assert_eq!(rust.len(), 2);

        let both = collection.query(&LinkFilter {
            category: CategoryFilter::Category("News".to_string()),
            search: "rust".to_string(),
        });
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "Third");

        let none = collection.query(&LinkFilter {
            category: CategoryFilter::Category("Missing".to_string()),
            search: String::new(),
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_merge_import_appends_and_reassigns_colliding_ids() {
        let mut collection = loaded(&[record("dup", "Existing", "https://one.com", "A")]);

        let count = collection
            .merge_import(
                &json!({
                    "links": [
                        record("dup", "Collides with store", "https://two.com", "B"),
                        record("new", "Fresh", "https://three.com", "B"),
                        record("new", "Collides within batch", "https://four.com", "B"),
                    ]
                })
                .to_string(),
            )
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(collection.len(), 4);

        // no two links share an id afterwards
        let ids: HashSet<_> = collection.links().iter().map(|link| &link.id).collect();
        assert_eq!(ids.len(), 4);

        // the existing record was not overwritten
        assert_eq!(collection.get("dup").unwrap().title, "Existing");
    }

    #[test]
    fn test_merge_import_invalid_format() {
        let mut collection = Collection::default();
        assert!(matches!(
            collection.merge_import("not json"),
            Err(StoreError::InvalidFormat(_))
        ));
        assert!(matches!(
            collection.merge_import("[1,2]"),
            Err(StoreError::InvalidFormat(_))
        ));
        assert!(matches!(
            collection.merge_import("{\"links\": \"nope\"}"),
            Err(StoreError::InvalidFormat(_))
        ));
        assert!(matches!(
            collection.merge_import("{}"),
            Err(StoreError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_merge_import_atomicity() {
        let mut collection = loaded(&[record("1", "Existing", "https://one.com", "A")]);
        let before = collection.clone();

        let result = collection.merge_import(
            &json!({
                "links": [
                    record("2", "", "https://two.com", "B"),
                    record("3", "Bad", "ftp://three.com", "B"),
                ]
            })
            .to_string(),
        );

        assert!(matches!(result, Err(StoreError::NoValidRecords)));
        assert_eq!(collection.links(), before.links());
        assert_eq!(collection.categories(), before.categories());
    }

    #[test]
    fn test_export_empty_collection() {
        let collection = Collection::default();
        assert!(matches!(
            collection.export_json(),
            Err(StoreError::EmptyCollection)
        ));
    }

    #[test]
    fn test_export_is_pretty_printed_payload() {
        let collection = loaded(&[record("1", "One", "https://one.com", "A")]);
        let exported = collection.export_json().unwrap();
        assert!(exported.contains('\n'));

        let value: Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(value["links"].as_array().unwrap().len(), 1);
        assert_eq!(value["categories"], json!(["A"]));
    }
}
