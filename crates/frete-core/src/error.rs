//! # Error Types
//!
//! Domain-specific error types for frete-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  frete-core errors (this file)                                         │
//! │  ├── ValidationError  - One violated field constraint                  │
//! │  ├── ValidationErrors - Every violation found in one request           │
//! │  └── CoreError        - Validation failure OR broken quote contract    │
//! │                                                                         │
//! │  frete-api errors (separate crate)                                     │
//! │  └── ApiError         - What the HTTP caller sees (serialized)         │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → CoreError → ApiError       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every violation names the wire field it belongs to (`peso`, `formato`, ...)
//! 3. Errors are enum variants, never String
//! 4. Validation messages are surfaced verbatim to the end user

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced by the quote pipeline.
///
/// Only two kinds exist: the request was invalid (recoverable by the caller),
/// or the calculator produced something it must never produce (a contract
/// violation that is logged and reported generically).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The raw request violated one or more field constraints.
    #[error("Invalid shipping request: {0}")]
    Validation(#[from] ValidationErrors),

    /// A computed quote broke the output contract.
    ///
    /// ## When This Occurs
    /// Never, for requests that went through the validator. If it does, the
    /// price for `service` was non-finite, negative or too large to represent.
    #[error("Invalid quote for {service}: {reason}")]
    InvalidQuote { service: String, reason: String },
}

impl CoreError {
    /// True when the caller can fix the problem by correcting input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single violated constraint on one request field.
///
/// `field` always holds the JSON key the caller sent (`cepDestino`, `peso`,
/// `comprimento`, `altura`, `largura`, `formato`, `diametro`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is outside its inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value must not be below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., postal code with a hyphen).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// The wire field this violation belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }

    /// Converts into the `{field, message}` pair shown to callers.
    pub fn to_violation(&self) -> FieldViolation {
        FieldViolation {
            field: self.field().to_string(),
            message: self.to_string(),
        }
    }
}

/// Serializable `{field, message}` pair for one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

// =============================================================================
// Validation Errors (collected)
// =============================================================================

/// Every violation found in one request, in field order.
///
/// The validator never stops at the first problem: a form can show all of
/// them at once. An instance is never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps a list of violations. Returns `None` for an empty list.
    pub fn from_violations(violations: Vec<ValidationError>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(ValidationErrors(violations))
        }
    }

    /// Wraps violations the validator already knows to be non-empty.
    pub(crate) fn collected(violations: Vec<ValidationError>) -> Self {
        debug_assert!(!violations.is_empty());
        ValidationErrors(violations)
    }

    /// The violations in the order they were found.
    pub fn violations(&self) -> &[ValidationError] {
        &self.0
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a collection built by the validator.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any violation is for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    /// `{field, message}` pairs, in order.
    pub fn field_violations(&self) -> Vec<FieldViolation> {
        self.0.iter().map(ValidationError::to_violation).collect()
    }

    /// One human-readable message per violation, in order.
    pub fn details(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors(vec![err])
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
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
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "cepDestino".to_string(),
        };
        assert_eq!(err.to_string(), "cepDestino is required");

        let err = ValidationError::OutOfRange {
            field: "peso".to_string(),
            min: 1.0,
            max: 30000.0,
        };
        assert_eq!(err.to_string(), "peso must be between 1 and 30000");

        let err = ValidationError::NotAllowed {
            field: "formato".to_string(),
            allowed: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        };
        assert_eq!(err.to_string(), "formato must be one of: 1, 2, 3");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::InvalidFormat {
            field: "cepDestino".to_string(),
            reason: "must be exactly 8 digits".to_string(),
        };
        assert_eq!(err.field(), "cepDestino");

        let violation = err.to_violation();
        assert_eq!(violation.field, "cepDestino");
        assert_eq!(
            violation.message,
            "cepDestino has invalid format: must be exactly 8 digits"
        );
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        assert!(ValidationErrors::from_violations(Vec::new()).is_none());
    }

    #[test]
    fn test_collection_keeps_order_and_joins() {
        let errors = ValidationErrors::from_violations(vec![
            ValidationError::NotFinite {
                field: "peso".to_string(),
            },
            ValidationError::Negative {
                field: "diametro".to_string(),
            },
        ])
        .unwrap();

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("peso"));
        assert!(errors.has_field("diametro"));
        assert!(!errors.has_field("formato"));
        assert_eq!(
            errors.details(),
            vec![
                "peso must be a finite number".to_string(),
                "diametro must not be negative".to_string(),
            ]
        );
        assert_eq!(
            errors.to_string(),
            "peso must be a finite number; diametro must not be negative"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let errors: ValidationErrors = ValidationError::Required {
            field: "cepDestino".to_string(),
        }
        .into();
        let core_err: CoreError = errors.into();
        assert!(core_err.is_validation());
        assert_eq!(
            core_err.to_string(),
            "Invalid shipping request: cepDestino is required"
        );
    }

    #[test]
    fn test_invalid_quote_message() {
        let err = CoreError::InvalidQuote {
            service: "Express".to_string(),
            reason: "price is not finite".to_string(),
        };
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Invalid quote for Express: price is not finite");
    }
}
