//! Core traits for Guidepost.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where content
//! lives and how it should be discovered. The CLI implements it with a
//! TOML-backed configuration; embedders and tests supply their own.

use std::path::PathBuf;

use crate::Result;

/// File extensions treated as content when a provider does not override
/// [`ConfigProvider::content_extensions`].
pub const DEFAULT_CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use guidepost_core::traits::ConfigProvider;
/// use guidepost_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "docs-site"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         Ok(self.root.join("content").join(content_type))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined (e.g., missing
    /// environment variable or invalid configuration).
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content type.
    ///
    /// `content_type` is a key like `"guides"`. The implementation decides
    /// how to map it to an actual filesystem path.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;

    /// File extensions (without the dot) that are loaded as documents.
    fn content_extensions(&self) -> Vec<String> {
        DEFAULT_CONTENT_EXTENSIONS
            .iter()
            .map(|ext| (*ext).to_string())
            .collect()
    }

    /// Whether dangling related-guide references fail validation.
    ///
    /// They never fail a registry build; this only affects reporting.
    fn strict_related(&self) -> bool {
        false
    }
}
