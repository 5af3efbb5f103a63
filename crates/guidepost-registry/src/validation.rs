//! Cross-reference validation for a built registry.
//!
//! Building a [`Registry`] already rejects structural problems (bad headers,
//! duplicate slugs). The checks here cover the softer editorial issues that
//! never block a build: dangling, self, and repeated `relatedGuides`
//! entries, plus guides nothing links to.

use std::collections::{BTreeSet, HashSet};

use guidepost_core::normalize_id;
use serde::{Deserialize, Serialize};

use crate::Registry;

// ============================================================================
// Types
// ============================================================================

/// Result of registry validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the registry is valid (no errors).
    pub valid: bool,
    /// Issues that fail validation.
    pub errors: Vec<ValidationIssue>,
    /// Issues worth fixing that do not fail validation.
    pub warnings: Vec<ValidationIssue>,
    /// Informational findings.
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Add an error (marks the result invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Add an informational finding.
    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// First issue with this code, whatever its severity.
    pub fn find(&self, code: &str) -> Option<&ValidationIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
            .find(|issue| issue.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A validation issue found in the registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue code, e.g. `DANGLING_RELATED`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected guide slugs.
    pub guides: Vec<String>,
    /// Affected references, rendered `source -> target`.
    pub references: Vec<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            guides: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Attach affected guides.
    pub fn with_guides(mut self, guides: Vec<String>) -> Self {
        self.guides = guides;
        self
    }

    /// Attach affected references.
    pub fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = references;
        self
    }
}

/// Issue codes.
pub mod codes {
    /// A `relatedGuides` entry names no registered guide.
    pub const DANGLING_RELATED: &str = "DANGLING_RELATED";
    /// A guide lists itself as related.
    pub const SELF_REFERENCE: &str = "SELF_REFERENCE";
    /// A guide lists the same target more than once.
    pub const DUPLICATE_RELATED: &str = "DUPLICATE_RELATED";
    /// Guides no other guide links to.
    pub const UNREFERENCED_GUIDES: &str = "UNREFERENCED_GUIDES";
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate the related-guide graph of `registry`.
///
/// Checks for:
/// - Dangling references (warning, or error when `strict`)
/// - Guides listing themselves
/// - Slugs listed twice by one guide
/// - Guides no other guide references (info)
pub fn validate_registry(registry: &Registry, strict: bool) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_dangling(registry, strict, &mut result);
    check_self_references(registry, &mut result);
    check_duplicates(registry, &mut result);
    check_unreferenced(registry, &mut result);

    result
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_dangling(registry: &Registry, strict: bool, result: &mut ValidationResult) {
    let dangling = registry.dangling_references();
    if dangling.is_empty() {
        return;
    }

    let guides: Vec<String> = dangling
        .iter()
        .map(|d| d.source.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let references: Vec<String> = dangling
        .iter()
        .map(|d| format!("{} -> {}", d.source, d.target))
        .collect();

    let issue = ValidationIssue::new(
        codes::DANGLING_RELATED,
        format!(
            "{} related-guide reference(s) point to unknown guides",
            references.len()
        ),
    )
    .with_guides(guides)
    .with_references(references);

    if strict {
        result.add_error(issue);
    } else {
        result.add_warning(issue);
    }
}

fn check_self_references(registry: &Registry, result: &mut ValidationResult) {
    let guides: Vec<String> = registry
        .iter()
        .filter(|doc| {
            doc.related_guides()
                .iter()
                .any(|r| registry.resolve_slug(r) == Some(doc.slug()))
        })
        .map(|doc| doc.slug().to_string())
        .collect();

    if !guides.is_empty() {
        let references = guides.iter().map(|g| format!("{g} -> {g}")).collect();
        result.add_warning(
            ValidationIssue::new(
                codes::SELF_REFERENCE,
                format!("{} guide(s) list themselves as related", guides.len()),
            )
            .with_guides(guides)
            .with_references(references),
        );
    }
}

fn check_duplicates(registry: &Registry, result: &mut ValidationResult) {
    let mut guides = Vec::new();
    let mut references = Vec::new();

    for doc in registry {
        let mut seen: HashSet<String> = HashSet::new();
        let mut reported: HashSet<String> = HashSet::new();
        for target in doc.related_guides() {
            // Unresolved entries compare in normalised form, as `get` would.
            let key = registry
                .resolve_slug(target)
                .map(str::to_string)
                .unwrap_or_else(|| normalize_id(target));
            if !seen.insert(key.clone()) && reported.insert(key.clone()) {
                references.push(format!("{} -> {}", doc.slug(), key));
            }
        }
        if !reported.is_empty() {
            guides.push(doc.slug().to_string());
        }
    }

    if !references.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                codes::DUPLICATE_RELATED,
                format!("{} related-guide entry(ies) are repeated", references.len()),
            )
            .with_guides(guides)
            .with_references(references),
        );
    }
}

fn check_unreferenced(registry: &Registry, result: &mut ValidationResult) {
    let referenced: HashSet<&str> = registry
        .iter()
        .flat_map(|doc| {
            doc.related_guides()
                .iter()
                .filter_map(move |target| registry.resolve_slug(target))
                .filter(move |slug| *slug != doc.slug())
        })
        .collect();

    let unreferenced: Vec<String> = registry
        .slugs()
        .filter(|slug| !referenced.contains(slug))
        .map(str::to_string)
        .collect();

    if !unreferenced.is_empty() {
        result.add_info(
            ValidationIssue::new(
                codes::UNREFERENCED_GUIDES,
                format!(
                    "{} guide(s) are not referenced by any other guide",
                    unreferenced.len()
                ),
            )
            .with_guides(unreferenced),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
