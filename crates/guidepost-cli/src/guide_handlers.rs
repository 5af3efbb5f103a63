//! Handler functions for guide commands.
//!
//! Each handler reads from a built [`Catalog`]; rendering is split out into
//! `render_*` functions so output can be checked without capturing stdout.

use std::fmt::Write as _;

use guidepost_content::{Category, Document};
use guidepost_core::{Error, Result};
use guidepost_registry::stats::{quick_summary, top_guides_by_references};
use guidepost_registry::{Catalog, CatalogStats, RelatedGuide, ValidationIssue, ValidationResult};
use serde::Serialize;

/// Number of guides shown under "Most referenced" in `stats`.
const TOP_REFERENCED: usize = 5;

// ============================================================================
// Output types
// ============================================================================

/// JSON shape of `show --json`.
#[derive(Debug, Serialize)]
pub struct GuideView<'a> {
    /// Registered slug.
    pub slug: &'a str,
    /// Source file the guide was read from.
    pub path: &'a std::path::Path,
    /// Parsed front matter.
    pub metadata: &'a guidepost_content::GuideMetadata,
    /// Words of prose and code in the body.
    pub word_count: usize,
    /// Estimated reading time, rounded up.
    pub reading_time_minutes: usize,
    /// Related guides that resolved.
    pub related: Vec<RelatedGuide>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Show one guide with its resolved related guides.
pub fn handle_show(catalog: &Catalog, slug: &str, json: bool) -> Result<()> {
    let doc = catalog
        .get(slug)
        .ok_or_else(|| Error::not_found(format!("no guide with slug `{slug}`")))?;
    let related = catalog.resolve_related(doc);

    if json {
        let view = GuideView {
            slug: doc.slug(),
            path: doc.path(),
            metadata: doc.metadata(),
            word_count: doc.word_count(),
            reading_time_minutes: doc.reading_time_minutes(),
            related,
        };
        let out = serde_json::to_string_pretty(&view)
            .map_err(|e| Error::serialization(e.to_string()))?;
        println!("{out}");
    } else {
        print!("{}", render_guide(doc, &related));
    }
    Ok(())
}

/// List slugs carrying `tag`.
pub fn handle_tag(catalog: &Catalog, tag: &str) -> Result<()> {
    let slugs = catalog.by_tag(tag);
    if slugs.is_empty() {
        log::info!("no guides tagged `{tag}`");
    }
    print!("{}", render_listing(catalog, slugs));
    Ok(())
}

/// List slugs in `category`.
///
/// Unlike tags, categories form a closed set, so an unknown name is an
/// error rather than an empty listing.
pub fn handle_category(catalog: &Catalog, category: &str) -> Result<()> {
    let category: Category = category.parse()?;
    print!(
        "{}",
        render_listing(catalog, catalog.index().by_category_kind(category))
    );
    Ok(())
}

/// List tags with counts.
pub fn handle_tags(catalog: &Catalog) -> Result<()> {
    for (tag, count) in catalog.index().tags() {
        println!("{tag} ({count})");
    }
    Ok(())
}

/// List categories with counts, including empty ones.
pub fn handle_categories(catalog: &Catalog) -> Result<()> {
    for category in Category::ALL {
        let count = catalog.index().by_category_kind(category).len();
        println!("{category} ({count})");
    }
    Ok(())
}

/// Run cross-reference validation.
///
/// # Errors
///
/// [`Error::Operation`] when validation reports errors, so the process
/// exits non-zero.
pub fn handle_validate(catalog: &Catalog, strict: bool) -> Result<()> {
    let result = catalog.validate(strict);
    print!("{}", render_validation(&result));

    if result.valid {
        Ok(())
    } else {
        Err(Error::operation(format!(
            "Validation failed with {} error(s)",
            result.errors.len()
        )))
    }
}

/// Show catalog statistics.
pub fn handle_stats(catalog: &Catalog, json: bool) -> Result<()> {
    let stats = catalog.stats();
    if json {
        let out = serde_json::to_string_pretty(&stats)
            .map_err(|e| Error::serialization(e.to_string()))?;
        println!("{out}");
    } else {
        print!("{}", render_stats(catalog, &stats));
    }
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

/// Text view of one guide.
pub fn render_guide(doc: &Document, related: &[RelatedGuide]) -> String {
    let mut out = String::new();
    let meta = doc.metadata();

    let _ = writeln!(out, "{}", doc.title());
    let _ = writeln!(out, "{}", "=".repeat(doc.title().chars().count()));
    let _ = writeln!(out, "Slug:       {}", doc.slug());
    let _ = writeln!(out, "Category:   {}", doc.category());
    if !doc.tags().is_empty() {
        let _ = writeln!(out, "Tags:       {}", doc.tags().join(", "));
    }
    match doc.published_at() {
        Some(date) => {
            let _ = writeln!(out, "Published:  {date}");
        }
        None => {
            let _ = writeln!(out, "Published:  (undated)");
        }
    }
    if let Some(updated) = meta.updated_at {
        let _ = writeln!(out, "Updated:    {updated}");
    }
    if let Some(difficulty) = doc.difficulty() {
        let _ = writeln!(out, "Difficulty: {difficulty}");
    }
    if let Some(author) = &meta.author {
        let _ = writeln!(out, "Author:     {author}");
    }
    let _ = writeln!(
        out,
        "Reading:    {} min ({} words)",
        doc.reading_time_minutes(),
        doc.word_count()
    );
    if !doc.description().is_empty() {
        let _ = writeln!(out, "\n{}", doc.description());
    }

    if !doc.external_links().is_empty() {
        let _ = writeln!(out, "\nExternal links:");
        for link in doc.external_links() {
            let _ = writeln!(out, "  - {} <{}>", link.title, link.url);
        }
    }

    if !related.is_empty() {
        let _ = writeln!(out, "\nRelated guides:");
        for guide in related {
            let _ = writeln!(out, "  - {} ({})", guide.title, guide.slug);
        }
    }

    out
}

/// One line per slug: `date  slug  title`.
pub fn render_listing(catalog: &Catalog, slugs: &[String]) -> String {
    let mut out = String::new();
    for doc in slugs.iter().filter_map(|slug| catalog.get(slug)) {
        let date = doc
            .published_at()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());
        let _ = writeln!(out, "{date}  {}  {}", doc.slug(), doc.title());
    }
    out
}

/// Text validation report.
pub fn render_validation(result: &ValidationResult) -> String {
    let mut out = String::new();

    if result.valid {
        let _ = writeln!(out, "Guides are valid.");
    } else {
        let _ = writeln!(out, "Guides have validation issues:");
    }

    render_issues(&mut out, "ERROR", &result.errors);
    render_issues(&mut out, "WARN ", &result.warnings);
    render_issues(&mut out, "INFO ", &result.info);

    let _ = writeln!(
        out,
        "\nSummary: {} error(s), {} warning(s)",
        result.errors.len(),
        result.warnings.len()
    );
    out
}

fn render_issues(out: &mut String, label: &str, issues: &[ValidationIssue]) {
    for issue in issues {
        let _ = writeln!(out, "  {label} [{}]: {}", issue.code, issue.message);
        let details = if issue.references.is_empty() {
            &issue.guides
        } else {
            &issue.references
        };
        for detail in details {
            let _ = writeln!(out, "    - {detail}");
        }
    }
}

/// Text statistics report.
pub fn render_stats(catalog: &Catalog, stats: &CatalogStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Catalog Statistics");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out, "{}\n", quick_summary(catalog));
    let _ = writeln!(out, "Guides:            {}", stats.guide_count);
    let _ = writeln!(out, "  Undated:         {}", stats.undated_count);
    let _ = writeln!(out, "  Unreferenced:    {}", stats.unreferenced_count);
    let _ = writeln!(out, "Related refs:      {}", stats.related_references);
    let _ = writeln!(out, "  Resolved:        {}", stats.resolved_references);
    let _ = writeln!(out, "  Dangling:        {}", stats.dangling_references);
    let _ = writeln!(out, "Total words:       {}", stats.total_words);
    let _ = writeln!(out, "Avg reading time:  {:.1} min", stats.avg_reading_minutes);

    if !stats.category_distribution.is_empty() {
        let _ = writeln!(out, "\nCategories:");
        for (category, count) in &stats.category_distribution {
            let _ = writeln!(out, "  {category}: {count}");
        }
    }

    if !stats.difficulty_distribution.is_empty() {
        let _ = writeln!(out, "\nDifficulty:");
        for (difficulty, count) in &stats.difficulty_distribution {
            let _ = writeln!(out, "  {difficulty}: {count}");
        }
    }

    let top: Vec<_> = top_guides_by_references(catalog.registry(), TOP_REFERENCED)
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect();
    if !top.is_empty() {
        let _ = writeln!(out, "\nMost referenced:");
        for (slug, count) in top {
            let _ = writeln!(out, "  {slug}: {count}");
        }
    }

    out
}

// ============================================================================
// Tests
// ============================================================================
