//! # Validation Module
//!
//! Field validators applied before data enters a cart.
//!
//! ## Validation Strategy
//! The original rule set is `required`, `numeric` and `min:N` checks over a
//! loosely-typed mapping. With typed inputs most of the `numeric` rule is
//! enforced by the compiler; what remains here are the checks the type
//! system cannot express: empty strings, non-finite floats, and minimums.
//!
//! ## Usage
//! ```rust
//! use carton_core::validation::{validate_required, validate_quantity};
//!
//! validate_required("id", "sku-001").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult = Result<(), ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a required string field is present and non-blank.
///
/// ## Example
/// ```rust
/// use carton_core::validation::validate_required;
///
/// assert!(validate_required("name", "Pocket Radio").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be an actual number (NaN and infinities are rejected)
/// - Must be non-negative; zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use carton_core::validation::validate_price;
///
/// assert!(validate_price(10.99).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult {
    if !price.is_finite() {
        return Err(ValidationError::NotNumeric {
            field: "price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::BelowMinimum {
            field: "price".to_string(),
            min: 0,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least [`crate::QUANTITY_FLOOR`] (1)
pub fn validate_quantity(quantity: i64) -> ValidationResult {
    if quantity < crate::QUANTITY_FLOOR {
        return Err(ValidationError::BelowMinimum {
            field: "quantity".to_string(),
            min: crate::QUANTITY_FLOOR,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("id", "sku-001").is_ok());
        assert!(validate_required("id", "").is_err());
        assert!(validate_required("id", "  \t ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(10.99).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_first_failure_message() {
        let err = validate_quantity(0).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be at least 1");
    }
}
