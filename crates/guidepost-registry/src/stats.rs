//! Catalog statistics.
//!
//! Counts and distributions over the guide corpus, including related-guide
//! reference totals and the most referenced guides.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Catalog, Registry};

// ============================================================================
// Types
// ============================================================================

/// Summary numbers for a catalog.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total number of guides.
    pub guide_count: usize,
    /// Guides per category.
    pub category_distribution: BTreeMap<String, usize>,
    /// Guides per difficulty, with `unspecified` for guides without one.
    pub difficulty_distribution: BTreeMap<String, usize>,
    /// Guides per (lowercased) tag.
    pub tag_distribution: BTreeMap<String, usize>,
    /// Related-guide entries declared across all guides.
    pub related_references: usize,
    /// Entries that resolve to a registered guide.
    pub resolved_references: usize,
    /// Entries that do not resolve.
    pub dangling_references: usize,
    /// Guides without `publishedAt`.
    pub undated_count: usize,
    /// Guides no other guide references.
    pub unreferenced_count: usize,
    /// Guide with the most incoming references.
    pub most_referenced: Option<String>,
    /// Incoming references of [`most_referenced`](Self::most_referenced).
    pub max_incoming: usize,
    /// Body words across all guides.
    pub total_words: usize,
    /// Mean reading time in minutes.
    pub avg_reading_minutes: f32,
}

// ============================================================================
// Functions
// ============================================================================

/// Compute statistics for a catalog.
pub fn compute_stats(catalog: &Catalog) -> CatalogStats {
    let registry = catalog.registry();
    let guide_count = registry.len();

    let mut category_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut difficulty_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut undated_count = 0;
    let mut total_words = 0;
    let mut total_minutes = 0;

    for doc in registry {
        *category_distribution
            .entry(doc.category().to_string())
            .or_insert(0) += 1;

        let difficulty = doc
            .difficulty()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unspecified".to_string());
        *difficulty_distribution.entry(difficulty).or_insert(0) += 1;

        if doc.published_at().is_none() {
            undated_count += 1;
        }
        total_words += doc.word_count();
        total_minutes += doc.reading_time_minutes();
    }

    let tag_distribution: BTreeMap<String, usize> = catalog
        .index()
        .tags()
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();

    let related_references: usize = registry.iter().map(|d| d.related_guides().len()).sum();
    let dangling_references = registry.dangling_references().len();

    let incoming = incoming_counts(registry);
    let unreferenced_count = incoming.values().filter(|&&n| n == 0).count();

    let (most_referenced, max_incoming) = top_guides_by_references(registry, 1)
        .into_iter()
        .find(|(_, n)| *n > 0)
        .map(|(slug, n)| (Some(slug), n))
        .unwrap_or((None, 0));

    let avg_reading_minutes = if guide_count > 0 {
        total_minutes as f32 / guide_count as f32
    } else {
        0.0
    };

    CatalogStats {
        guide_count,
        category_distribution,
        difficulty_distribution,
        tag_distribution,
        related_references,
        resolved_references: related_references - dangling_references,
        dangling_references,
        undated_count,
        unreferenced_count,
        most_referenced,
        max_incoming,
        total_words,
        avg_reading_minutes,
    }
}

/// Get a quick summary of catalog size.
pub fn quick_summary(catalog: &Catalog) -> String {
    format!(
        "{} guides, {} tags, {} categories",
        catalog.registry().len(),
        catalog.index().tag_count(),
        catalog.index().categories().len()
    )
}

/// Top `limit` guides by incoming related-guide references.
///
/// Each linking guide counts once per target, however many spellings of
/// the slug it lists. Self references are not counted. Ties are broken by slug.
pub fn top_guides_by_references(registry: &Registry, limit: usize) -> Vec<(String, usize)> {
    let mut scores: Vec<(String, usize)> = incoming_counts(registry)
        .into_iter()
        .map(|(slug, n)| (slug.to_string(), n))
        .collect();

    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scores.truncate(limit);
    scores
}

fn incoming_counts(registry: &Registry) -> HashMap<&str, usize> {
    // Initialise all guides with 0
    let mut counts: HashMap<&str, usize> = registry.slugs().map(|s| (s, 0)).collect();

    for doc in registry {
        let targets: HashSet<&str> = doc
            .related_guides()
            .iter()
            .filter_map(|target| registry.resolve_slug(target))
            .filter(|slug| *slug != doc.slug())
            .collect();
        for slug in targets {
            *counts.entry(slug).or_insert(0) += 1;
        }
    }

    counts
}

// ============================================================================
// Tests
// ============================================================================
