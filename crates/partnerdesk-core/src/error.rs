//! # Error Types
//!
//! Domain-specific error types for partnerdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  partnerdesk-core errors (this file)                                   │
//! │  ├── CoreError        - Domain errors (not found, bad input)           │
//! │  ├── ValidationError  - Field-level validation failures                │
//! │  └── ErrorKind        - Classification the caller branches on          │
//! │                                                                         │
//! │  partnerdesk-db errors (separate crate)                                │
//! │  └── DbError          - Storage failures + wrapped CoreError           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → presentation layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ID, search term, field)
//! 3. Every error maps onto exactly one [`ErrorKind`]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Error Kind
// =============================================================================

/// Classification of every failure this system can report.
///
/// The presentation layer branches on the kind, not on the concrete variant:
///
/// | Kind              | Typical handling                                   |
/// |-------------------|----------------------------------------------------|
/// | `NotFound`        | Empty-state message ("no partners yet")           |
/// | `ValidationError` | Highlight the offending form field                |
/// | `StorageError`    | Error dialog, operation aborted                   |
/// | `InvalidInput`    | "Not a number" hint next to the field             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    ValidationError,
    StorageError,
    InvalidInput,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The discounted partner listing is empty.
    ///
    /// ## When This Occurs
    /// - No partner has a single recorded sale yet
    /// - All partners with sales were deleted
    ///
    /// This is an expected condition: callers render an empty state.
    #[error("No partners found")]
    NoPartners,

    /// Neither the identifier nor the name strategy matched the search term.
    #[error("Partner not found: {0}")]
    PartnerNotFound(String),

    /// Product is unknown or its category has no coefficient.
    #[error("Coefficient not found for product {0}")]
    CoefficientNotFound(i64),

    /// Material type is unknown.
    #[error("Defect rate not found for material {0}")]
    DefectRateNotFound(i64),

    /// Raw text could not be parsed as a number.
    ///
    /// ## When This Occurs
    /// - Calculator fields contain letters, commas, or are empty
    #[error("{field} is not a valid number: '{value}'")]
    InvalidInput { field: String, value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidInput error for a field and its raw text.
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NoPartners
            | CoreError::PartnerNotFound(_)
            | CoreError::CoefficientNotFound(_)
            | CoreError::DefectRateNotFound(_) => ErrorKind::NotFound,
            CoreError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CoreError::Validation(_) => ErrorKind::ValidationError,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any query runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is valid on its own but the computation it feeds overflows.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Invalid format (e.g., email without '@', rating with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::NoPartners.to_string(), "No partners found");
        assert_eq!(
            CoreError::PartnerNotFound("Рога".to_string()).to_string(),
            "Partner not found: Рога"
        );
        assert_eq!(
            CoreError::invalid_input("param1", "2,5").to_string(),
            "param1 is not a valid number: '2,5'"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("director");
        assert_eq!(err.to_string(), "director is required");

        let err = ValidationError::MustNotBeNegative {
            field: "rating".to_string(),
        };
        assert_eq!(err.to_string(), "rating must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(CoreError::NoPartners.kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::CoefficientNotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::DefectRateNotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::invalid_input("quantity", "ten").kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_error_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"NOT_FOUND\"");
    }
}
