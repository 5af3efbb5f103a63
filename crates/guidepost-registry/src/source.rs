//! Where raw document text comes from.
//!
//! A [`DocumentSource`] yields every `(path, text)` pair up front; the
//! registry is only built once all of them are in hand.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::future::try_join_all;
use guidepost_core::util::files::{FindOptions, find_all_files, read_file};
use guidepost_core::{ConfigProvider, Result};

/// Content type passed to [`ConfigProvider::content_path`] for guides.
pub const GUIDES_CONTENT_TYPE: &str = "guides";

/// One unparsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path the text was read from (labels errors, seeds the slug).
    pub path: PathBuf,
    /// Full raw text, front matter included.
    pub text: String,
}

impl SourceDocument {
    /// Pair a path with its raw text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Provider of raw guide documents.
///
/// # Example
///
/// ```rust,ignore
/// struct HttpSource { base_url: String }
///
/// #[async_trait]
/// impl DocumentSource for HttpSource {
///     async fn load(&self) -> Result<Vec<SourceDocument>> {
///         // Fetch every guide
///     }
///
///     fn name(&self) -> &str {
///         "http"
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Load every document.
    async fn load(&self) -> Result<Vec<SourceDocument>>;

    /// Short name used in log messages.
    fn name(&self) -> &str;
}

// ============================================================================
// DirectorySource
// ============================================================================

/// Reads every matching file under a content directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
    options: FindOptions,
}

impl DirectorySource {
    /// Source over `root` with the default `md`/`mdx` extensions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: FindOptions::content(),
        }
    }

    /// Source over the configured guides directory and extensions.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let root = config.content_path(GUIDES_CONTENT_TYPE)?;
        Ok(Self::new(root).with_extensions(config.content_extensions()))
    }

    /// Replace the extension filter.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_extensions(extensions);
        self
    }

    /// Directory this source walks.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    /// Files are read concurrently and returned sorted by relative path.
    ///
    /// # Errors
    ///
    /// `NotFound` when the directory does not exist, `IoWithPath` for the
    /// first file that cannot be read.
    async fn load(&self) -> Result<Vec<SourceDocument>> {
        let files = find_all_files(&self.root, self.options.clone()).await?;
        log::debug!(
            "found {} guide file(s) under {}",
            files.len(),
            self.root.display()
        );

        let texts = try_join_all(files.iter().map(|f| read_file(&f.path))).await?;

        Ok(files
            .into_iter()
            .zip(texts)
            .map(|(file, text)| SourceDocument::new(file.path, text))
            .collect())
    }

    fn name(&self) -> &str {
        "directory"
    }
}

// ============================================================================
// MemorySource
// ============================================================================

/// In-memory documents.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: Vec<SourceDocument>,
}

impl MemorySource {
    /// Source over `(path, text)` pairs, kept in the given order.
    pub fn new<I, P, T>(documents: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<PathBuf>,
        T: Into<String>,
    {
        Self {
            documents: documents
                .into_iter()
                .map(|(path, text)| SourceDocument::new(path, text))
                .collect(),
        }
    }

    /// Append a document.
    pub fn push(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.documents.push(SourceDocument::new(path, text));
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn load(&self) -> Result<Vec<SourceDocument>> {
        Ok(self.documents.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
