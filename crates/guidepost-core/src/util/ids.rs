//! Slug derivation and validation.
//!
//! A slug is lowercase kebab-case: ASCII letters and digits separated by
//! single hyphens, with no leading or trailing hyphen.

use std::path::Path;

/// File stems that stand for their parent directory (`guides/git/index.mdx`
/// has slug `git`).
const INDEX_STEMS: &[&str] = &["index", "readme"];

/// Normalise free text into slug form.
///
/// Lowercases ASCII letters, turns every run of other characters into a
/// single hyphen, and trims hyphens from both ends.
///
/// ```
/// use guidepost_core::normalize_id;
///
/// assert_eq!(normalize_id("API Docs & Design"), "api-docs-design");
/// assert_eq!(normalize_id("qa_testing"), "qa-testing");
/// ```
pub fn normalize_id(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Derive a slug from a document path.
///
/// Uses the file stem, or the parent directory name when the stem is
/// `index`/`README`. Returns `None` when nothing usable remains.
///
/// ```
/// use guidepost_core::id_from_path;
/// use std::path::Path;
///
/// assert_eq!(id_from_path(Path::new("guides/Git_Workflow.md")).as_deref(), Some("git-workflow"));
/// assert_eq!(id_from_path(Path::new("guides/api-docs/index.mdx")).as_deref(), Some("api-docs"));
/// ```
pub fn id_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;

    let raw = if INDEX_STEMS.iter().any(|s| stem.eq_ignore_ascii_case(s)) {
        path.parent()?.file_name()?.to_str()?
    } else {
        stem
    };

    let id = normalize_id(raw);
    if id.is_empty() { None } else { Some(id) }
}

/// Whether `slug` is already in canonical lowercase kebab-case.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_id_basic() {
        assert_eq!(normalize_id("git-workflow"), "git-workflow");
        assert_eq!(normalize_id("  Git Workflow  "), "git-workflow");
        assert_eq!(normalize_id("DevOps"), "devops");
    }

    #[test]
    fn test_normalize_id_collapses_separators() {
        assert_eq!(normalize_id("ci -- cd__pipelines"), "ci-cd-pipelines");
        assert_eq!(normalize_id("--edge--"), "edge");
    }

    #[test]
    fn test_normalize_id_empty() {
        assert_eq!(normalize_id(""), "");
        assert_eq!(normalize_id("&&&"), "");
    }

    #[test]
    fn test_id_from_path_stem() {
        let path = PathBuf::from("/content/guides/devops/ci-cd-pipelines.mdx");
        assert_eq!(id_from_path(&path).as_deref(), Some("ci-cd-pipelines"));
    }

    #[test]
    fn test_id_from_path_index_uses_parent() {
        let path = PathBuf::from("content/backend-development-guide/index.md");
        assert_eq!(
            id_from_path(&path).as_deref(),
            Some("backend-development-guide")
        );

        let readme = PathBuf::from("content/caching/README.md");
        assert_eq!(id_from_path(&readme).as_deref(), Some("caching"));
    }

    #[test]
    fn test_id_from_path_bare_index() {
        assert_eq!(id_from_path(Path::new("index.md")), None);
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("api-docs"));
        assert!(is_valid_slug("http2-guide"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-api"));
        assert!(!is_valid_slug("api-"));
        assert!(!is_valid_slug("api--docs"));
        assert!(!is_valid_slug("API-docs"));
        assert!(!is_valid_slug("api docs"));
    }

    #[test]
    fn test_normalized_ids_are_valid_slugs() {
        for raw in ["Hello World", "a__b", "x1 y2", "Über Guide"] {
            let id = normalize_id(raw);
            assert!(is_valid_slug(&id), "{raw:?} -> {id:?}");
        }
    }
}
