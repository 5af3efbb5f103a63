//! Async file utilities for content discovery.
//!
//! Provides the file walking and reading operations used by document
//! sources to hand raw text to the registry.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::traits::DEFAULT_CONTENT_EXTENSIONS;
use crate::{Error, Result};

/// Options for discovering content files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extensions to match (without dot). Empty matches every file.
    pub extensions: Vec<String>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl FindOptions {
    /// Create options matching Markdown and MDX files.
    pub fn content() -> Self {
        Self::default().with_extensions(DEFAULT_CONTENT_EXTENSIONS.iter().copied())
    }

    /// Replace the extension filter.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Whether `path` passes the extension filter.
    pub fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions.iter().any(|wanted| *wanted == e)
            })
            .unwrap_or(false)
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching criteria in a directory.
///
/// Results are sorted by relative path so repeated walks of the same tree
/// produce the same order.
///
/// # Example
///
/// ```no_run
/// # use guidepost_core::util::files::{find_all_files, FindOptions};
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let files = find_all_files(Path::new("content/guides"), FindOptions::content()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !exists(base_path).await {
        return Err(Error::not_found(format!(
            "Content directory {} does not exist",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result.map_err(|e| Error::io(std::io::Error::other(e)))?;
        let path = entry.path();

        // Skip directories
        if path.is_dir() {
            continue;
        }

        // Check depth limit
        if let Some(max_depth) = options.max_depth {
            let depth = path
                .strip_prefix(base_path)
                .map(|p| p.components().count())
                .unwrap_or(0);
            if depth > max_depth {
                continue;
            }
        }

        if !options.matches_extension(&path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        files.push(FileInfo {
            path: path.to_path_buf(),
            stem,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_find_all_files_md_and_mdx() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.md"), "# One").await.unwrap();
        fs::write(temp.path().join("two.mdx"), "# Two").await.unwrap();
        fs::write(temp.path().join("skip.txt"), "skip").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::content())
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_files_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("zeta.md"), "z").await.unwrap();
        fs::write(temp.path().join("alpha.md"), "a").await.unwrap();
        fs::write(temp.path().join("mid.mdx"), "m").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::content())
            .await
            .unwrap();
        let stems: Vec<&str> = files.iter().map(|f| f.stem.as_str()).collect();

        assert_eq!(stems, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_find_all_files_nested() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("root.md"), "root").await.unwrap();

        let subdir = temp.path().join("devops");
        fs::create_dir(&subdir).await.unwrap();
        fs::write(subdir.join("nested.mdx"), "nested").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::content())
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files
            .iter()
            .any(|f| f.relative_path == PathBuf::from("devops/nested.mdx")));
    }

    #[tokio::test]
    async fn test_find_all_files_max_depth() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("root.md"), "root").await.unwrap();

        let level1 = temp.path().join("level1");
        fs::create_dir(&level1).await.unwrap();
        fs::write(level1.join("file1.md"), "l1").await.unwrap();

        // root.md has 1 component, level1/file1.md has 2
        let files = find_all_files(temp.path(), FindOptions::content().with_max_depth(1))
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].stem, "root");
    }

    #[tokio::test]
    async fn test_find_all_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = find_all_files(&temp.path().join("nope"), FindOptions::content()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all_files_uppercase_extension() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("LOUD.MD"), "x").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::content())
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.md");
        fs::write(&file_path, "# Test Content").await.unwrap();

        assert_eq!(read_file(&file_path).await.unwrap(), "# Test Content");
    }

    #[tokio::test]
    async fn test_read_file_not_found() {
        let temp = TempDir::new().unwrap();
        let result = read_file(&temp.path().join("nonexistent.md")).await;
        assert!(result.unwrap_err().to_string().contains("nonexistent.md"));
    }

    #[test]
    fn test_find_options_extensions_normalised() {
        let opts = FindOptions::default().with_extensions([".MDX", "md"]);
        assert_eq!(opts.extensions, vec!["mdx", "md"]);
        assert!(opts.matches_extension(Path::new("a/b.mdx")));
        assert!(!opts.matches_extension(Path::new("a/b.txt")));
        assert!(!opts.matches_extension(Path::new("a/README")));
    }

    #[test]
    fn test_find_options_default_matches_everything() {
        let opts = FindOptions::default();
        assert!(opts.extensions.is_empty());
        assert!(opts.max_depth.is_none());
        assert!(opts.matches_extension(Path::new("anything.bin")));
    }
}
