//! The parsed guide document.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use guidepost_core::{id_from_path, is_valid_slug, Error, Result};
use serde::Serialize;

use crate::markdown::word_count;
use crate::metadata::{Category, Difficulty, ExternalLink, GuideMetadata};

/// Reading speed used for [`Document::reading_time_minutes`].
pub const WORDS_PER_MINUTE: usize = 200;

/// One guide: its slug, source path, typed metadata, and opaque body.
///
/// Documents are immutable once parsed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    slug: String,
    path: PathBuf,
    metadata: GuideMetadata,
    body: String,
}

impl Document {
    /// Parse raw document text read from `path`.
    ///
    /// The slug is the front matter's `slug` key when present (it must
    /// already be lowercase kebab-case), otherwise it is derived from the
    /// path with [`id_from_path`].
    ///
    /// # Errors
    ///
    /// - [`Error::MetadataParse`] for a missing, unclosed, or malformed header,
    ///   or when no slug can be derived from the path
    /// - [`Error::MissingField`] for a missing `title` or `category`
    /// - [`Error::InvalidSlug`] for a declared slug that is not kebab-case
    pub fn parse(path: impl AsRef<Path>, text: &str) -> Result<Self> {
        let path = path.as_ref();
        let (metadata, body) = GuideMetadata::parse(path, text)?;

        let slug = match metadata.slug.as_deref().map(str::trim) {
            Some(declared) => {
                if !is_valid_slug(declared) {
                    return Err(Error::invalid_slug(path, declared));
                }
                declared.to_string()
            }
            None => id_from_path(path).ok_or_else(|| {
                Error::metadata_parse(path, "cannot derive a slug from the file name")
            })?,
        };

        Ok(Self {
            slug,
            path: path.to_path_buf(),
            metadata,
            body: body.to_string(),
        })
    }

    /// Build a document from already-typed parts.
    pub fn from_parts(
        slug: impl Into<String>,
        path: impl Into<PathBuf>,
        metadata: GuideMetadata,
        body: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            path: path.into(),
            metadata,
            body: body.into(),
        }
    }

    /// Unique identifier.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full typed front matter.
    pub fn metadata(&self) -> &GuideMetadata {
        &self.metadata
    }

    /// Content after the front matter.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Trimmed display title.
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Short description, empty when the header has none.
    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    /// Editorial category.
    pub fn category(&self) -> Category {
        self.metadata.category
    }

    /// Tags in header order, deduplicated ignoring case.
    pub fn tags(&self) -> &[String] {
        &self.metadata.tags
    }

    /// Publication date, `None` for undated guides.
    pub fn published_at(&self) -> Option<NaiveDate> {
        self.metadata.published_at
    }

    /// Declared difficulty, if any.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.metadata.difficulty
    }

    /// Links to outside resources.
    pub fn external_links(&self) -> &[ExternalLink] {
        &self.metadata.external_links
    }

    /// Raw `relatedGuides` entries as written in the header.
    pub fn related_guides(&self) -> &[String] {
        &self.metadata.related_guides
    }

    /// Words of prose and code in the body.
    pub fn word_count(&self) -> usize {
        word_count(&self.body)
    }

    /// Estimated reading time in minutes, rounded up.
    pub fn reading_time_minutes(&self) -> usize {
        self.word_count().div_ceil(WORDS_PER_MINUTE)
    }
}
