//! Related-guide resolution.
//!
//! Guides are written incrementally, so a `relatedGuides` entry may name a
//! guide that does not exist yet. Resolution drops such entries (with a
//! warning) instead of failing; [`Registry::dangling_references`] lists them
//! for reporting.

use std::collections::HashSet;

use guidepost_content::Document;
use serde::{Deserialize, Serialize};

use crate::Registry;

/// Summary of a guide as shown in a related-guides list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedGuide {
    /// Slug of the related guide.
    pub slug: String,
    /// Its title.
    pub title: String,
    /// Its description (may be empty).
    pub description: String,
}

impl From<&Document> for RelatedGuide {
    fn from(doc: &Document) -> Self {
        Self {
            slug: doc.slug().to_string(),
            title: doc.title().to_string(),
            description: doc.description().to_string(),
        }
    }
}

/// A `relatedGuides` entry that names no registered guide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    /// Slug of the guide declaring the reference.
    pub source: String,
    /// The slug that did not resolve.
    pub target: String,
}

impl Registry {
    /// Resolve `document`'s related guides against this registry.
    ///
    /// Output preserves declaration order. Entries are matched the way
    /// [`Registry::get`] matches, so `Git Workflow` and `git-workflow` name
    /// the same guide. Each target appears once, at its first position, and
    /// a document never lists itself. Entries that do not resolve are
    /// skipped and logged at `warn` level.
    pub fn resolve_related(&self, document: &Document) -> Vec<RelatedGuide> {
        let mut seen: HashSet<&str> = HashSet::new();

        document
            .related_guides()
            .iter()
            .filter_map(|slug| match self.get(slug) {
                Some(target) if target.slug() == document.slug() => {
                    log::debug!("{}: ignoring self reference `{}`", document.slug(), slug);
                    None
                }
                Some(target) if !seen.insert(target.slug()) => {
                    log::debug!("{}: ignoring repeated reference `{}`", document.slug(), slug);
                    None
                }
                Some(target) => Some(RelatedGuide::from(target)),
                None => {
                    log::warn!(
                        "{}: related guide `{}` not found, skipping",
                        document.slug(),
                        slug
                    );
                    None
                }
            })
            .collect()
    }

    /// Registered slug a `relatedGuides` entry points to, if any.
    pub fn resolve_slug(&self, reference: &str) -> Option<&str> {
        self.get(reference).map(Document::slug)
    }

    /// Summary of the guide with this slug, if registered.
    pub fn summary(&self, slug: &str) -> Option<RelatedGuide> {
        self.get(slug).map(RelatedGuide::from)
    }

    /// Every unresolved related-guide reference, in slug order of the
    /// declaring guide and declaration order within it.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.iter()
            .flat_map(|doc| {
                doc.related_guides()
                    .iter()
                    .filter(move |target| !self.contains(target))
                    .map(move |target| DanglingReference {
                        source: doc.slug().to_string(),
                        target: target.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::build([
            (
                "api-docs.md",
                "---\ntitle: API Documentation & Design\ncategory: developers\n\
                 relatedGuides: [backend-development-guide, nonexistent-guide]\n---\n",
            ),
            (
                "backend-development-guide.md",
                "---\ntitle: Backend Development\ndescription: Services and data\n\
                 category: developers\nrelatedGuides: [git-workflow, api-docs]\n---\n",
            ),
            (
                "git-workflow.md",
                "---\ntitle: Git Workflow\ncategory: devops\n---\n",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_drops_missing() {
        let registry = registry();
        let doc = registry.get("api-docs").unwrap();

        let related = registry.resolve_related(doc);

        assert_eq!(
            related,
            vec![RelatedGuide {
                slug: "backend-development-guide".into(),
                title: "Backend Development".into(),
                description: "Services and data".into(),
            }]
        );
    }

    #[test]
    fn test_resolve_preserves_declaration_order() {
        let registry = registry();
        let doc = registry.get("backend-development-guide").unwrap();

        let slugs: Vec<String> = registry
            .resolve_related(doc)
            .into_iter()
            .map(|r| r.slug)
            .collect();

        assert_eq!(slugs, vec!["git-workflow", "api-docs"]);
    }

    #[test]
    fn test_resolve_none_declared() {
        let registry = registry();
        let doc = registry.get("git-workflow").unwrap();
        assert!(registry.resolve_related(doc).is_empty());
    }

    #[test]
    fn test_resolve_document_outside_registry() {
        let registry = registry();
        let outsider = Document::parse(
            "draft.md",
            "---\ntitle: Draft\ncategory: devops\nrelatedGuides: [git-workflow, draft-two]\n---\n",
        )
        .unwrap();

        let related = registry.resolve_related(&outsider);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "git-workflow");
    }

    #[test]
    fn test_resolve_matches_normalised_entries_once() {
        let registry = Registry::build([
            (
                "api-docs.md",
                "---\ntitle: API Docs\ncategory: developers\n\
                 relatedGuides: [Git Workflow, git-workflow, API Docs, GIT_WORKFLOW]\n---\n",
            ),
            ("git-workflow.md", "---\ntitle: Git Workflow\ncategory: devops\n---\n"),
        ])
        .unwrap();
        let doc = registry.get("api-docs").unwrap();

        let slugs: Vec<String> = registry
            .resolve_related(doc)
            .into_iter()
            .map(|r| r.slug)
            .collect();

        assert_eq!(slugs, vec!["git-workflow"]);
        assert_eq!(registry.resolve_slug("Git Workflow"), Some("git-workflow"));
        assert_eq!(registry.resolve_slug("ghost"), None);
    }

    #[test]
    fn test_summary() {
        let registry = registry();
        assert_eq!(
            registry.summary("git-workflow").unwrap().title,
            "Git Workflow"
        );
        assert!(registry.summary("missing").is_none());
    }

    #[test]
    fn test_dangling_references() {
        let registry = registry();
        assert_eq!(
            registry.dangling_references(),
            vec![DanglingReference {
                source: "api-docs".into(),
                target: "nonexistent-guide".into(),
            }]
        );
    }
}
