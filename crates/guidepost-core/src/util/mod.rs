//! Utility modules for file operations, slugs, and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async file discovery and reading utilities
//! - [`ids`]: Slug derivation and validation
//! - [`paths`]: Path helpers (tilde expansion)

pub mod files;
pub mod ids;
pub mod paths;
