//! Error types for Guidepost operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Guidepost crates. Uses `thiserror` for derive macros.
//!
//! The content variants ([`Error::MetadataParse`], [`Error::MissingField`],
//! [`Error::DuplicateSlug`], [`Error::InvalidSlug`]) are *structural*: any one
//! of them aborts a registry build. See [`Error::is_structural`].

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Guidepost operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A higher-level operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),

    /// A document's front matter is missing, unterminated, or does not decode.
    #[error("Malformed front matter in {path}: {message}")]
    MetadataParse {
        /// The offending document.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// A required front-matter field is absent or blank.
    #[error("Missing required field `{field}` in {path}")]
    MissingField {
        /// The offending document.
        path: PathBuf,
        /// Name of the missing field as written in front matter.
        field: &'static str,
    },

    /// Two documents resolve to the same slug.
    #[error("Duplicate slug `{slug}` declared by {first} and {second}")]
    DuplicateSlug {
        /// The contested slug.
        slug: String,
        /// The document that claimed the slug first.
        first: PathBuf,
        /// The document that collided with it.
        second: PathBuf,
    },

    /// An explicitly declared slug is not lowercase kebab-case.
    #[error("Invalid slug `{slug}` in {path}: slugs must be lowercase kebab-case")]
    InvalidSlug {
        /// The offending document.
        path: PathBuf,
        /// The slug as declared.
        slug: String,
    },
}

impl Error {
    /// Create an I/O error from a bare `std::io::Error`.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Create an I/O error that records the path being accessed.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create a front-matter parse error for `path`.
    pub fn metadata_parse(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::MetadataParse {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Create a missing-field error for `path`.
    pub fn missing_field(path: impl AsRef<Path>, field: &'static str) -> Self {
        Self::MissingField {
            path: path.as_ref().to_path_buf(),
            field,
        }
    }

    /// Create a duplicate-slug error naming both contributing paths.
    pub fn duplicate_slug(
        slug: impl Into<String>,
        first: impl AsRef<Path>,
        second: impl AsRef<Path>,
    ) -> Self {
        Self::DuplicateSlug {
            slug: slug.into(),
            first: first.as_ref().to_path_buf(),
            second: second.as_ref().to_path_buf(),
        }
    }

    /// Create an invalid-slug error.
    pub fn invalid_slug(path: impl AsRef<Path>, slug: impl Into<String>) -> Self {
        Self::InvalidSlug {
            path: path.as_ref().to_path_buf(),
            slug: slug.into(),
        }
    }

    /// Whether this error invalidates a whole registry build.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MetadataParse { .. }
                | Self::MissingField { .. }
                | Self::DuplicateSlug { .. }
                | Self::InvalidSlug { .. }
        )
    }

    /// The document path this error refers to, if any.
    ///
    /// For [`Error::DuplicateSlug`] this is the second (colliding) path.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::IoWithPath { path, .. }
            | Self::MetadataParse { path, .. }
            | Self::MissingField { path, .. }
            | Self::InvalidSlug { path, .. } => Some(path),
            Self::DuplicateSlug { second, .. } => Some(second),
            _ => None,
        }
    }
}

/// Result type alias using Guidepost's Error type.
pub type Result<T> = std::result::Result<T, Error>;
