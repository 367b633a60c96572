//! # Error Types
//!
//! Domain-specific error types for harmony-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  harmony-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  harmony-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → presentation layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (dates, statuses, field names)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! ## What Is NOT an Error
//! Expected business outcomes are `bool` / `Option` results, never errors:
//! a room being unavailable, a duplicate room number, a deletion refused
//! because of an active booking. Only rule violations and bad input land here.

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A date range was constructed with `end <= start`.
    ///
    /// ## When This Occurs
    /// - Check-out date on or before check-in date
    /// - A revenue query with reversed bounds
    #[error("invalid date range: end {end} is not after start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A status change that the entity's state machine forbids.
    ///
    /// ## When This Occurs
    /// - Room Repair → Occupied (must pass through Free)
    /// - Booking Cancelled → Active (terminal states never leave)
    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// A status label that is not part of the enumerated set.
    #[error("unknown {kind} status: '{value}'")]
    UnknownStatus { kind: String, value: String },

    /// A room type label that is not part of the enumerated set.
    #[error("unknown room type: '{0}'")]
    UnknownRoomType(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store mutation is attempted.
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed phone, email, price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A date that must not lie in the past.
    #[error("{field} must not be before {today}")]
    DateInPast { field: String, today: NaiveDate },

    /// A date that must come after another one.
    #[error("{field} must be after {other}")]
    DateNotAfter { field: String, other: String },
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
        let err = CoreError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: end 2024-01-10 is not after start 2024-01-12"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "full_name".to_string(),
        };
        assert_eq!(err.to_string(), "full_name is required");

        let err = ValidationError::TooLong {
            field: "room number".to_string(),
            max: 10,
        };
        assert_eq!(err.to_string(), "room number must be at most 10 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "full_name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
