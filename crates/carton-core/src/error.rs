//! # Error Types
//!
//! Domain-specific error types for carton-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  carton-core errors (this file)                                     │
//! │  ├── CartError        - Structural/shape failures (raised)         │
//! │  └── ValidationError  - Field-level validation failures            │
//! │                                                                     │
//! │  NOT errors:                                                        │
//! │  ├── Hook veto        - `false` return, state unmutated            │
//! │  └── Unknown item id  - `false`/`None` return, cart unchanged      │
//! │                                                                     │
//! │  Expected, recoverable outcomes stay in return values; only        │
//! │  validation and shape failures are raised to the caller.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors carry the first failing validation message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Structural errors raised when data cannot enter the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// An item failed add-time validation (missing id/name, non-numeric
    /// price, quantity below 1). Carries the first validator failure.
    #[error("invalid item: {0}")]
    InvalidItem(ValidationError),

    /// A condition was constructed with a missing name, type or value.
    #[error("invalid condition: {0}")]
    InvalidCondition(ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
///
/// Produced by the validators in [`crate::validation`]; the first failure
/// wins and is wrapped in the matching [`CartError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field holds a non-numeric value (NaN or infinite).
    #[error("{field} must be numeric")]
    NotNumeric { field: String },

    /// A numeric field is below its minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::BelowMinimum {
            field: "quantity".to_string(),
            min: 1,
        };
        assert_eq!(err.to_string(), "quantity must be at least 1");
    }

    #[test]
    fn test_cart_error_carries_first_message() {
        let err = CartError::InvalidItem(ValidationError::NotNumeric {
            field: "price".to_string(),
        });
        assert_eq!(err.to_string(), "invalid item: price must be numeric");
    }
}
