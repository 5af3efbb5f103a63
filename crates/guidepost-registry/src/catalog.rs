//! Registry and indices bundled for read-only sharing.

use std::path::Path;

use guidepost_content::Document;
use guidepost_core::Result;

use crate::index::GuideIndex;
use crate::related::RelatedGuide;
use crate::source::DocumentSource;
use crate::stats::{CatalogStats, compute_stats};
use crate::validation::{ValidationResult, validate_registry};
use crate::Registry;

/// A built registry with its tag and category indices.
///
/// Nothing mutates a catalog after construction, so it can be shared
/// across tasks behind an `Arc` without locking.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    registry: Registry,
    index: GuideIndex,
}

impl Catalog {
    /// Parse every `(path, text)` pair and build the catalog.
    ///
    /// # Example
    ///
    /// ```
    /// use guidepost_registry::Catalog;
    ///
    /// let catalog = Catalog::build([
    ///     ("caching.md", "---\ntitle: Caching\ncategory: performance\ntags: [performance]\npublishedAt: 2024-01-15\n---\n"),
    ///     ("profiling.md", "---\ntitle: Profiling\ncategory: performance\ntags: [performance]\npublishedAt: 2024-01-20\n---\n"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(catalog.by_tag("Performance"), ["profiling", "caching"]);
    /// ```
    pub fn build<I, P, T>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<Path>,
        T: AsRef<str>,
    {
        Registry::build(sources).map(Self::from_registry)
    }

    /// Index an existing registry.
    pub fn from_registry(registry: Registry) -> Self {
        let index = GuideIndex::build(&registry);
        Self { registry, index }
    }

    /// Load every document from `source`, then build.
    ///
    /// Reading finishes before parsing starts; a failure in either step
    /// leaves no catalog. A document that fails to parse is logged by path.
    pub async fn load<S: DocumentSource + ?Sized>(source: &S) -> Result<Self> {
        let documents = source.load().await?;
        log::debug!(
            "loaded {} document(s) from {} source",
            documents.len(),
            source.name()
        );

        let catalog = Self::build(documents.iter().map(|d| (&d.path, &d.text))).inspect_err(|e| {
            if let Some(path) = e.path() {
                log::error!("catalog build stopped at {}", path.display());
            }
        })?;
        log::info!(
            "catalog ready: {} guide(s), {} tag(s)",
            catalog.registry.len(),
            catalog.index.tag_count()
        );
        Ok(catalog)
    }

    /// Look up a guide by slug.
    pub fn get(&self, slug: &str) -> Option<&Document> {
        self.registry.get(slug)
    }

    /// Resolve `document`'s related guides, dropping unknown slugs,
    /// repeats and self links.
    pub fn resolve_related(&self, document: &Document) -> Vec<RelatedGuide> {
        self.registry.resolve_related(document)
    }

    /// Related guides of the guide with this slug, or `None` if it is not
    /// registered.
    pub fn related_for(&self, slug: &str) -> Option<Vec<RelatedGuide>> {
        self.get(slug).map(|doc| self.resolve_related(doc))
    }

    /// Slugs carrying `tag`, newest first.
    pub fn by_tag(&self, tag: &str) -> &[String] {
        self.index.by_tag(tag)
    }

    /// Slugs in `category`, newest first.
    pub fn by_category(&self, category: &str) -> &[String] {
        self.index.by_category(category)
    }

    /// Documents carrying `tag`, newest first.
    pub fn documents_by_tag(&self, tag: &str) -> Vec<&Document> {
        self.by_tag(tag)
            .iter()
            .filter_map(|slug| self.registry.get(slug))
            .collect()
    }

    /// Cross-reference report. `strict` turns dangling references into errors.
    pub fn validate(&self, strict: bool) -> ValidationResult {
        validate_registry(&self.registry, strict)
    }

    /// Aggregate counts over the whole catalog.
    pub fn stats(&self) -> CatalogStats {
        compute_stats(self)
    }

    /// The underlying slug registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The tag and category index.
    pub fn index(&self) -> &GuideIndex {
        &self.index
    }

    /// Number of guides.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the catalog holds no guides.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use guidepost_core::Error;
    use std::sync::Arc;

    const API: &str = "---\ntitle: API Documentation & Design\ncategory: developers\n\
                       tags: [api]\npublishedAt: 2024-01-15\n\
                       relatedGuides: [git-workflow, ghost]\n---\n";
    const GIT: &str = "---\ntitle: Git Workflow\ncategory: devops\ntags: [API, git]\n\
                       publishedAt: 2024-02-01\n---\n";

    fn catalog() -> Catalog {
        Catalog::build([("api-docs.md", API), ("git-workflow.md", GIT)]).unwrap()
    }

    #[test]
    fn test_lookup_and_listing() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get("api-docs").unwrap().title(), "API Documentation & Design");
        assert_eq!(catalog.by_tag("api"), ["git-workflow", "api-docs"]);
        assert_eq!(catalog.by_category("devops"), ["git-workflow"]);

        let titles: Vec<&str> = catalog
            .documents_by_tag("API")
            .into_iter()
            .map(|d| d.title())
            .collect();
        assert_eq!(titles, vec!["Git Workflow", "API Documentation & Design"]);
    }

    #[test]
    fn test_related_for() {
        let catalog = catalog();

        let related = catalog.related_for("api-docs").unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].title, "Git Workflow");
        assert!(catalog.related_for("missing").is_none());
    }

    #[test]
    fn test_validate_and_stats() {
        let catalog = catalog();

        assert!(catalog.validate(false).valid);
        assert!(!catalog.validate(true).valid);
        assert_eq!(catalog.stats().dangling_references, 1);
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = MemorySource::new([("api-docs.md", API), ("git-workflow.md", GIT)]);

        let catalog = Catalog::load(&source).await.unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_load_aborts_on_bad_document() {
        let source = MemorySource::new([("api-docs.md", API), ("broken.md", "---\ntitle: x\n")]);

        let err = Catalog::load(&source).await.unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.path(), Some(Path::new("broken.md")));
    }

    #[tokio::test]
    async fn test_shared_across_tasks() {
        let catalog = Arc::new(catalog());

        let handles: Vec<_> = ["api", "git"]
            .into_iter()
            .map(|tag| {
                let catalog = Arc::clone(&catalog);
                tokio::spawn(async move { catalog.by_tag(tag).len() })
            })
            .collect();

        let mut counts = Vec::new();
        for handle in handles {
            counts.push(handle.await.unwrap());
        }
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_duplicate_slug_error() {
        let err = Catalog::build([("a/git-workflow.md", GIT), ("b/git-workflow.md", GIT)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug { .. }));
    }
}
