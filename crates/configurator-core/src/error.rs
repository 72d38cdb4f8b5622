//! # Error Types
//!
//! Domain-specific error types for configurator-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  configurator-core errors (this file)                                  │
//! │  ├── CoreError        - Selection / resolution / catalog failures      │
//! │  └── ValidationError  - Input and catalog-definition validation        │
//! │                                                                         │
//! │  collaborator errors (separate crates)                                 │
//! │  ├── StoreError       - Quote storage failures                         │
//! │  └── RenderError      - Document rendering failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → user                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverable vs. Defect
//! - `InvalidSection`, `InvalidOption`, `InvalidModel`: a bad update request.
//!   The caller keeps its previous Selection and may try again.
//! - `UnresolvedReference`: the Selection and the Catalog disagree. This is a
//!   programming or data-migration defect; quote generation is aborted.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core configuration and pricing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Update named a section the catalog does not define.
    #[error("Unknown configuration section: {section_id}")]
    InvalidSection { section_id: String },

    /// Update named an option that is not part of the given section.
    ///
    /// ## When This Occurs
    /// ```text
    /// with_option("battery", "turbo")
    ///      │
    ///      ▼
    /// section "battery" exists, but has no option "turbo"
    ///      │
    ///      ▼
    /// InvalidOption { section_id: "battery", option_id: "turbo" }
    /// ```
    #[error("Section {section_id} has no option {option_id}")]
    InvalidOption {
        section_id: String,
        option_id: String,
    },

    /// Model selection named a model the catalog does not define.
    #[error("Unknown vehicle model: {model_id}")]
    InvalidModel { model_id: String },

    /// A Selection refers to something the current Catalog doesn't have.
    ///
    /// ## When This Occurs
    /// - Selection was built against an older catalog (version skew)
    /// - Selection was deserialized from a stored quote
    /// - Selection is missing an entry for a catalog section
    #[error("Unresolved {kind} reference: {reference}")]
    UnresolvedReference {
        kind: &'static str,
        reference: String,
    },

    /// Catalog definition could not be parsed.
    #[error("Catalog definition is malformed: {0}")]
    CatalogFormat(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an UnresolvedReference error.
    pub fn unresolved(kind: &'static str, reference: impl Into<String>) -> Self {
        CoreError::UnresolvedReference {
            kind,
            reference: reference.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for user input (customer details, identifiers) and for catalog
/// definitions that break catalog invariants.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two models with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// More than one option of a section is flagged as default.
    #[error("Section {section_id} marks more than one option as default")]
    MultipleDefaults { section_id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
