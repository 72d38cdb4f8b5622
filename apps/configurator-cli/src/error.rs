//! # API Error Type
//!
//! Unified error type for configurator commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Configurator                       │
//! │                                                                         │
//! │  ev-configurator quote --option battery=turbo                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Selection Error? ── CoreError::InvalidOption ─────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Store / Render Error? ── StoreError ───────────► ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error: [INVALID_SELECTION] Section battery has no option turbo │
//! │  exit code 1                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ApiError` serializes with a machine-readable `code` and a human-readable
//! `message`, so the same value works for JSON output.

use serde::Serialize;

use configurator_core::{CoreError, ValidationError};
use configurator_render::RenderError;
use configurator_store::StoreError;

use crate::state::ConfigError;

/// Error returned from configurator commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_SELECTION",
///   "message": "Section battery has no option turbo"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Quote or other resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Unknown model, section or option in an update
    InvalidSelection,

    /// Selection or quote doesn't match the catalog
    CatalogMismatch,

    /// Catalog definition is invalid
    CatalogError,

    /// Environment configuration is invalid
    ConfigError,

    /// Quote storage failed
    StoreError,

    /// Document rendering failed
    RenderError,

    /// Reading or writing a file failed
    IoError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSection { .. }
            | CoreError::InvalidOption { .. }
            | CoreError::InvalidModel { .. } => {
                ApiError::new(ErrorCode::InvalidSelection, err.to_string())
            }
            CoreError::UnresolvedReference { .. } => {
                ApiError::new(ErrorCode::CatalogMismatch, err.to_string())
            }
            CoreError::CatalogFormat(_) => ApiError::new(ErrorCode::CatalogError, err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => {
                // ids come from UUID v4, so this is a bug rather than user error
                tracing::error!("Duplicate quote id: {}", err);
                ApiError::new(ErrorCode::StoreError, err.to_string())
            }
            StoreError::CapacityExceeded { .. } => {
                ApiError::new(ErrorCode::StoreError, err.to_string())
            }
        }
    }
}

/// Converts render errors to API errors.
impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::PageTooShort { .. } | RenderError::PdfPageTooSmall { .. } => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            RenderError::Pdf(e) => {
                tracing::error!("PDF writing failed: {}", e);
                ApiError::new(ErrorCode::RenderError, "Failed to render quote document")
            }
            RenderError::Encode(e) => {
                tracing::error!("Quote encoding failed: {}", e);
                ApiError::new(ErrorCode::RenderError, "Failed to render quote document")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = ApiError::from(CoreError::InvalidOption {
            section_id: "battery".into(),
            option_id: "turbo".into(),
        });
        assert_eq!(err.code, ErrorCode::InvalidSelection);
        assert_eq!(err.message, "Section battery has no option turbo");

        let err = ApiError::from(CoreError::unresolved("model", "roadster"));
        assert_eq!(err.code, ErrorCode::CatalogMismatch);

        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "email".into(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_store_error_maps_to_store_code() {
        let err = ApiError::from(StoreError::CapacityExceeded { max: 2 });
        assert_eq!(err.code, ErrorCode::StoreError);
    }

    #[test]
    fn test_render_errors_map_to_codes() {
        let err = ApiError::from(RenderError::PageTooShort { lines: 4, min: 10 });
        assert_eq!(err.code, ErrorCode::ConfigError);

        let err = ApiError::from(RenderError::Pdf("broken xref".into()));
        assert_eq!(err.code, ErrorCode::RenderError);
        assert!(!err.message.contains("xref"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Quote", "abc");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Quote not found: abc");
    }

    #[test]
    fn test_display_uses_wire_code() {
        let err = ApiError::validation("bad email");
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] bad email");
    }
}
