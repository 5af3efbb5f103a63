//! Front-matter parsing and the guide document model.
//!
//! # Modules
//!
//! - [`markdown`]: generic frontmatter splitting and Markdown text helpers
//! - [`metadata`]: the typed guide header ([`GuideMetadata`])
//! - [`document`]: a parsed guide with its slug ([`Document`])

#![doc = include_str!("../README.md")]

pub mod document;
pub mod markdown;
pub mod metadata;

pub use document::Document;
pub use metadata::{parse_date, parse_document, Category, Difficulty, ExternalLink, GuideMetadata};
