//! # Error Types
//!
//! Domain-level error types for depot-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  depot-core errors (this file)                                         │
//! │  └── ValidationError  - Input rejected before any SQL runs             │
//! │                                                                         │
//! │  depot-db errors (separate crate)                                      │
//! │  ├── ClassifiedError  - Normalized driver failures                     │
//! │  └── DbError          - ClassifiedError + infrastructure failures      │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → (external handler) → response       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a repository touches the database, so a rejected order or
/// patch never opens a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A collection has fewer entries than required.
    #[error("{field} must contain at least {min} entries")]
    TooFew { field: String, min: usize },

    /// A collection has more entries than allowed.
    #[error("{field} must contain at most {max} entries")]
    TooMany { field: String, max: usize },

    /// Two fields contradict each other (e.g. min above max).
    #[error("{field} is inconsistent: {reason}")]
    Inconsistent { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "order_number".to_string(),
        };
        assert_eq!(err.to_string(), "order_number is required");

        let err = ValidationError::TooFew {
            field: "items".to_string(),
            min: 1,
        };
        assert_eq!(err.to_string(), "items must contain at least 1 entries");
    }

    #[test]
    fn test_inconsistent_message() {
        let err = ValidationError::Inconsistent {
            field: "minimum_capacity".to_string(),
            reason: "exceeds maximum_capacity".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "minimum_capacity is inconsistent: exceeds maximum_capacity"
        );
    }
}
