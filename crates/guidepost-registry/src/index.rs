//! Secondary indices by tag and by category.
//!
//! Buckets are ordered newest first by `publishedAt`, with slug ascending as
//! the tie-breaker. Undated guides sort after every dated guide. Lookups are
//! case-insensitive and unknown keys yield an empty slice.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use guidepost_content::{Category, Document};

use crate::Registry;

/// Tag and category indices derived from a [`Registry`].
#[derive(Clone, Debug, Default)]
pub struct GuideIndex {
    by_tag: BTreeMap<String, Vec<String>>,
    by_category: HashMap<Category, Vec<String>>,
}

/// Normalise a tag for indexing and lookup.
pub fn tag_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Listing order: `publishedAt` descending (undated last), then slug ascending.
pub fn listing_order(a: &Document, b: &Document) -> Ordering {
    match (a.published_at(), b.published_at()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.slug().cmp(b.slug()))
}

impl GuideIndex {
    /// Build both indices from `registry`.
    pub fn build(registry: &Registry) -> Self {
        let mut ordered: Vec<&Document> = registry.iter().collect();
        ordered.sort_by(|a, b| listing_order(a, b));

        let mut by_tag: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut by_category: HashMap<Category, Vec<String>> = HashMap::new();

        // Pushing in listing order keeps every bucket sorted.
        for doc in ordered {
            for tag in doc.tags() {
                let bucket = by_tag.entry(tag_key(tag)).or_default();
                // Tags differing only by case collapse into one key.
                if bucket.last().map(String::as_str) != Some(doc.slug()) {
                    bucket.push(doc.slug().to_string());
                }
            }
            by_category
                .entry(doc.category())
                .or_default()
                .push(doc.slug().to_string());
        }

        Self {
            by_tag,
            by_category,
        }
    }

    /// Slugs carrying `tag`, newest first.
    pub fn by_tag(&self, tag: &str) -> &[String] {
        self.by_tag
            .get(&tag_key(tag))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Slugs in the category named `category`, newest first.
    ///
    /// Accepts any spelling [`Category`] parses (`DevOps`, `qa_testing`).
    pub fn by_category(&self, category: &str) -> &[String] {
        match category.parse::<Category>() {
            Ok(c) => self.by_category_kind(c),
            Err(_) => &[],
        }
    }

    /// Slugs in `category`, newest first.
    pub fn by_category_kind(&self, category: Category) -> &[String] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every indexed tag with its guide count, most used first, then by name.
    pub fn tags(&self) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self
            .by_tag
            .iter()
            .map(|(tag, slugs)| (tag.as_str(), slugs.len()))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags
    }

    /// Populated categories with their guide counts, in [`Category::ALL`] order.
    pub fn categories(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.by_category.get(&c).map(|slugs| (c, slugs.len())))
            .collect()
    }

    /// Number of distinct tags.
    pub fn tag_count(&self) -> usize {
        self.by_tag.len()
    }
}
