//! Typed guide front matter.
//!
//! [`GuideMetadata`] is the schema for the YAML header of every guide. Keys
//! are camelCase in YAML (`publishedAt`, `relatedGuides`, ...). Keys outside
//! the schema are preserved in [`GuideMetadata::extra`] so new editorial
//! fields never break a build.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use guidepost_core::{normalize_id, Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::markdown::extract_frontmatter;

// ============================================================================
// Category
// ============================================================================

/// Editorial category of a guide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Frontend and backend development practices.
    Developers,
    /// Software and system architecture.
    Architects,
    /// CI/CD, infrastructure, and operations.
    Devops,
    /// Performance engineering.
    Performance,
    /// Testing and quality assurance.
    QaTesting,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Developers,
        Category::Architects,
        Category::Devops,
        Category::Performance,
        Category::QaTesting,
    ];

    /// Canonical kebab-case name as written in front matter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Developers => "developers",
            Category::Architects => "architects",
            Category::Devops => "devops",
            Category::Performance => "performance",
            Category::QaTesting => "qa-testing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Case-insensitive; `_` and spaces count as `-`.
    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_id(s);
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| {
                Error::invalid_data(format!(
                    "unknown category `{s}` (expected one of: {})",
                    Category::ALL.map(|c| c.as_str()).join(", ")
                ))
            })
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Difficulty
// ============================================================================

/// Reader level a guide targets. Ordered `Beginner < Intermediate < Advanced`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    /// No prior knowledge assumed.
    Beginner,
    /// Working familiarity assumed.
    Intermediate,
    /// Deep experience assumed.
    Advanced,
}

impl Difficulty {
    /// Every level, lowest first.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Lowercase name as written in front matter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| {
                Error::invalid_data(format!(
                    "unknown difficulty `{s}` (expected beginner, intermediate, or advanced)"
                ))
            })
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// External links
// ============================================================================

/// A curated link to material outside the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// Link text.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Optional blurb shown under the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional grouping such as `documentation` or `tool`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ============================================================================
// GuideMetadata
// ============================================================================

/// The typed front matter of a guide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideMetadata {
    /// Explicit slug; when absent the slug is derived from the file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Display title. Required and non-blank.
    pub title: String,

    /// Short summary for cards and related-guide lists.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Editorial category. Required and non-blank.
    pub category: Category,

    /// Free-form tags, deduplicated case-insensitively.
    #[serde(
        default,
        deserialize_with = "de_string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    /// Publication date.
    #[serde(
        default,
        deserialize_with = "de_optional_date",
        serialize_with = "ser_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<NaiveDate>,

    /// Date of the last substantive revision.
    #[serde(
        default,
        deserialize_with = "de_optional_date",
        serialize_with = "ser_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDate>,

    /// Target reader level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Author byline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Curated outbound links, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_links: Vec<ExternalLink>,

    /// Slugs of related guides, in display order. May reference guides
    /// that do not exist yet.
    #[serde(
        default,
        deserialize_with = "de_string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub related_guides: Vec<String>,

    /// Every front-matter key not covered above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl GuideMetadata {
    /// Create metadata with the two required fields set.
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            slug: None,
            title: title.into(),
            description: String::new(),
            category,
            tags: Vec::new(),
            published_at: None,
            updated_at: None,
            difficulty: None,
            author: None,
            external_links: Vec::new(),
            related_guides: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tags (deduplicated case-insensitively).
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = dedupe_tags(tags.into_iter().map(Into::into));
        self
    }

    /// Set the publication date.
    pub fn with_published_at(mut self, date: NaiveDate) -> Self {
        self.published_at = Some(date);
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the related guide slugs.
    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_guides = related.into_iter().map(Into::into).collect();
        self
    }

    /// Set an explicit slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Decode a front-matter value, checking required fields first.
    ///
    /// `path` only labels errors.
    pub fn from_yaml(path: &Path, value: serde_yaml::Value) -> Result<Self> {
        let mapping = match &value {
            serde_yaml::Value::Mapping(m) => Some(m),
            serde_yaml::Value::Null => None,
            _ => {
                return Err(Error::metadata_parse(
                    path,
                    "front matter must be a mapping of keys to values",
                ));
            }
        };

        let field = |name: &str| mapping.and_then(|m| m.get(name)).filter(|v| !v.is_null());

        for name in ["title", "category"] {
            match field(name) {
                None => return Err(Error::missing_field(path, name)),
                Some(serde_yaml::Value::String(s)) if s.trim().is_empty() => {
                    return Err(Error::missing_field(path, name));
                }
                Some(_) => {}
            }
        }

        let mut metadata: GuideMetadata = serde_yaml::from_value(value)
            .map_err(|e| Error::metadata_parse(path, e.to_string()))?;
        metadata.title = metadata.title.trim().to_string();
        metadata.tags = dedupe_tags(std::mem::take(&mut metadata.tags));
        Ok(metadata)
    }

    /// Parse the front matter of a raw document.
    ///
    /// Returns the metadata and the body that follows the closing fence.
    ///
    /// # Errors
    ///
    /// - [`Error::MetadataParse`] if the fence is missing or unclosed, or the
    ///   YAML does not decode into the schema
    /// - [`Error::MissingField`] if `title` or `category` is absent or blank
    pub fn parse<'a>(path: &Path, text: &'a str) -> Result<(Self, &'a str)> {
        let extracted = extract_frontmatter(text).map_err(|e| match e {
            Error::InvalidData(msg) => Error::metadata_parse(path, msg),
            other => Error::metadata_parse(path, other.to_string()),
        })?;

        let body = extracted.body();
        let Some(value) = extracted.into_frontmatter() else {
            return Err(Error::metadata_parse(
                path,
                "document does not start with a `---` front-matter fence",
            ));
        };

        Ok((Self::from_yaml(path, value)?, body))
    }

    /// Serialize back to a fenced YAML block.
    ///
    /// Parsing the output with [`GuideMetadata::parse`] yields an equal value.
    pub fn to_front_matter(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self).map_err(|e| Error::serialization(e.to_string()))?;
        Ok(format!("---\n{yaml}---\n"))
    }
}

/// Parse a raw guide into its metadata and body.
///
/// Shorthand for [`GuideMetadata::parse`].
pub fn parse_document<'a>(path: impl AsRef<Path>, text: &'a str) -> Result<(GuideMetadata, &'a str)> {
    GuideMetadata::parse(path.as_ref(), text)
}

// ============================================================================
// Serde helpers
// ============================================================================

/// Keep the first spelling of each tag, comparing case-insensitively.
fn dedupe_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringList {
    Many(Vec<String>),
    One(String),
}

/// Accept either a YAML sequence or a comma-separated string.
fn de_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    let list = Option::<StringList>::deserialize(deserializer)?;
    Ok(match list {
        None => Vec::new(),
        Some(StringList::Many(items)) => items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(StringList::One(s)) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
    })
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp, keeping the date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| {
            Error::invalid_data(format!(
                "invalid date `{s}` (expected YYYY-MM-DD or RFC 3339)"
            ))
        })
}

fn de_optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) => parse_date(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

fn ser_optional_date<S: Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match date {
        Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_none(),
    }
}

// ============================================================================
// Tests
// ============================================================================
