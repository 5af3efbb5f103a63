//! YAML frontmatter extraction.
//!
//! A frontmatter block opens with `---` on the very first line (a UTF-8 BOM
//! is tolerated) and closes at the next line consisting of `---`. Trailing
//! whitespace and `\r\n` line endings are accepted on both fence lines.

use guidepost_core::{Error, Result};

const FENCE: &str = "---";
const BOM: char = '\u{feff}';

/// Result of splitting a document into frontmatter and body.
#[derive(Clone, Debug)]
pub struct FrontmatterResult<'a> {
    frontmatter: Option<serde_yaml::Value>,
    raw: Option<&'a str>,
    body: &'a str,
}

impl<'a> FrontmatterResult<'a> {
    /// Parsed frontmatter, `None` when the document has no fence.
    ///
    /// An empty block (`---` immediately followed by `---`) yields
    /// `Some(Value::Null)`.
    pub fn frontmatter(&self) -> Option<&serde_yaml::Value> {
        self.frontmatter.as_ref()
    }

    /// Take ownership of the parsed frontmatter.
    pub fn into_frontmatter(self) -> Option<serde_yaml::Value> {
        self.frontmatter
    }

    /// The YAML text between the fences.
    pub fn raw(&self) -> Option<&'a str> {
        self.raw
    }

    /// Everything after the closing fence (or the whole input without one).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Whether a frontmatter block was found.
    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }
}

/// Split `content` into frontmatter and body.
///
/// Returns a result without frontmatter when the first line is not a fence.
///
/// # Errors
///
/// - [`Error::InvalidData`] when the opening fence is never closed
/// - [`Error::InvalidData`] when the YAML between the fences is malformed
///
/// # Example
///
/// ```
/// use guidepost_content::markdown::extract_frontmatter;
///
/// let doc = "---\ntitle: Git Workflow\n---\n# Git\n";
/// let result = extract_frontmatter(doc).unwrap();
/// assert_eq!(result.body(), "# Git\n");
/// assert_eq!(
///     result.frontmatter().and_then(|fm| fm.get("title")).and_then(|v| v.as_str()),
///     Some("Git Workflow")
/// );
/// ```
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult<'_>> {
    let text = content.strip_prefix(BOM).unwrap_or(content);
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(no_frontmatter(text));
    };
    if !is_fence(first) {
        return Ok(no_frontmatter(text));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;

    for line in lines {
        if is_fence(line) {
            let raw = &text[yaml_start..offset];
            let body = &text[offset + line.len()..];
            let frontmatter = parse_yaml(raw)?;
            return Ok(FrontmatterResult {
                frontmatter: Some(frontmatter),
                raw: Some(raw),
                body,
            });
        }
        offset += line.len();
    }

    Err(Error::invalid_data(
        "front matter opened with `---` but never closed",
    ))
}

fn no_frontmatter(text: &str) -> FrontmatterResult<'_> {
    FrontmatterResult {
        frontmatter: None,
        raw: None,
        body: text,
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

fn parse_yaml(raw: &str) -> Result<serde_yaml::Value> {
    if raw.trim().is_empty() {
        return Ok(serde_yaml::Value::Null);
    }
    serde_yaml::from_str(raw).map_err(|e| Error::invalid_data(e.to_string()))
}
