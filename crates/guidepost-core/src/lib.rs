//! Shared types, traits, errors, and utilities for Guidepost.
//!
//! This crate provides the foundational types used across all Guidepost
//! crates. It has no internal Guidepost dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration trait
//! - [`util`]: File, path, and slug utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

// Convenience re-exports from util
pub use util::ids::{id_from_path, is_valid_slug, normalize_id};
