//! First-run sample data
//!
//! An empty store is populated with a handful of example links on first
//! launch so the list view has something to show.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Link, LinkImage};

/// Sample links installed into an empty collection
pub fn sample_links() -> Vec<Link> {
    let now = Utc::now();
    let link = |title: &str, url: &str, category: &str, description: &str| Link {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        url: url.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        image: None,
        created_at: now,
        updated_at: now,
    };

    let mut samples = vec![
        link(
            "MDN Web Docs",
            "https://developer.mozilla.org/",
            "Reference",
            "Guides and examples covering web technologies.",
        ),
        link(
            "Design inspiration",
            "https://dribbble.com/",
            "Inspiration",
            "Visual ideas from the creative community.",
        ),
        link("Tech news", "https://techcrunch.com/", "News", ""),
        link(
            "The Modern JavaScript Tutorial",
            "https://javascript.info/",
            "Learning",
            "Modern JavaScript tutorial with practical examples.",
        ),
    ];

    samples[0].image = Some(LinkImage::Url(
        "https://developer.mozilla.org/mdn-social-share.png".to_string(),
    ));

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::sanitize_link;
    use std::collections::HashSet;

    #[test]
    fn test_samples_pass_the_admission_gate() {
        for sample in sample_links() {
            let value = serde_json::to_value(&sample).unwrap();
            assert!(sanitize_link(&value).is_some(), "seed rejected: {:?}", sample.title);
        }
    }

    #[test]
    fn test_samples_have_distinct_ids_and_categories() {
        let samples = sample_links();
        let ids: HashSet<_> = samples.iter().map(|link| &link.id).collect();
        assert_eq!(ids.len(), samples.len());

        let categories: HashSet<_> = samples.iter().map(|link| &link.category).collect();
        assert_eq!(categories.len(), samples.len());
    }
}
