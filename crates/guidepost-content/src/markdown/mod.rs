//! Markdown parsing and frontmatter extraction utilities.
//!
//! - [`frontmatter`]: YAML frontmatter extraction
//! - [`parser`]: Markdown text extraction and word counts
//!
//! These utilities return generic types (`serde_yaml::Value`, `String`).
//! The typed guide header lives in [`crate::metadata`].

pub mod frontmatter;
pub mod parser;

pub use frontmatter::{extract_frontmatter, FrontmatterResult};
pub use parser::{extract_text_content, word_count};
