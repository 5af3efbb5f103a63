//! The read-only view over a guide corpus.
//!
//! # Modules
//!
//! - [`registry`]: Slug-keyed document map
//! - [`related`]: Related-guide resolution
//! - [`index`]: Tag and category indices
//! - [`catalog`]: Registry plus indices
//! - [`source`]: Document sources
//! - [`state`]: Shared application state
//! - [`validation`]: Cross-reference checks
//! - [`stats`]: Catalog statistics

#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod index;
pub mod registry;
pub mod related;
pub mod source;
pub mod state;
pub mod stats;
pub mod validation;

pub use catalog::Catalog;
pub use index::GuideIndex;
pub use registry::Registry;
pub use related::{DanglingReference, RelatedGuide};
pub use source::{DirectorySource, DocumentSource, MemorySource, SourceDocument};
pub use state::AppState;
pub use stats::{CatalogStats, compute_stats};
pub use validation::{ValidationIssue, ValidationResult, validate_registry};
