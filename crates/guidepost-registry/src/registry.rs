//! The slug-keyed document registry.
//!
//! A [`Registry`] is built in one step from every source document and is
//! never mutated afterwards. Building is all-or-nothing: the first
//! structural error (unparseable header, missing field, invalid or duplicate
//! slug) is returned and no registry exists.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

use guidepost_content::Document;
use guidepost_core::{normalize_id, Error, Result};

/// Immutable map from slug to [`Document`].
///
/// Iteration is in slug order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    documents: BTreeMap<String, Document>,
}

impl Registry {
    /// Parse and register every `(path, raw_text)` pair.
    ///
    /// All documents are parsed before any is inserted, so a parse failure
    /// late in the input still leaves no registry behind.
    ///
    /// # Errors
    ///
    /// Any error from [`Document::parse`], or [`Error::DuplicateSlug`]
    /// naming both paths when two documents share a slug.
    ///
    /// # Example
    ///
    /// ```
    /// use guidepost_registry::Registry;
    ///
    /// let registry = Registry::build([
    ///     ("guides/api-docs.mdx", "---\ntitle: API Documentation & Design\ncategory: developers\n---\n"),
    ///     ("guides/git-workflow.mdx", "---\ntitle: Git Workflow\ncategory: devops\n---\n"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(registry.get("api-docs").unwrap().title(), "API Documentation & Design");
    /// ```
    pub fn build<I, P, T>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<Path>,
        T: AsRef<str>,
    {
        let documents = sources
            .into_iter()
            .map(|(path, text)| Document::parse(path.as_ref(), text.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Self::from_documents(documents)
    }

    /// Register already-parsed documents.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateSlug`] on the first slug collision.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Result<Self> {
        let mut map: BTreeMap<String, Document> = BTreeMap::new();

        for doc in documents {
            match map.entry(doc.slug().to_string()) {
                Entry::Occupied(existing) => {
                    return Err(Error::duplicate_slug(
                        doc.slug(),
                        existing.get().path(),
                        doc.path(),
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(doc);
                }
            }
        }

        log::debug!("registry built with {} document(s)", map.len());
        Ok(Self { documents: map })
    }

    /// Look up a document by slug.
    ///
    /// The query is matched as given first, then in normalised form, so
    /// `get("Git Workflow")` finds `git-workflow`. Missing slugs return
    /// `None`.
    pub fn get(&self, slug: &str) -> Option<&Document> {
        self.documents
            .get(slug)
            .or_else(|| self.documents.get(&normalize_id(slug)))
    }

    /// Whether a document with this slug exists.
    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All slugs in ascending order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// All documents in slug order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Document;
    type IntoIter = std::collections::btree_map::Values<'a, String, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.values()
    }
}
