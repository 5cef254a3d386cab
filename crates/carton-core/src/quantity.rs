//! # Quantity Module
//!
//! Interpretation of quantity-change instructions for the cart update path.
//!
//! A bare value is a relative change; callers that want outright
//! replacement say so explicitly with [`QuantityUpdate::Absolute`]. The
//! sign of a relative change is read textually off the raw string, the
//! same way the condition engine reads its value strings.

use serde::{Deserialize, Serialize};

use crate::QUANTITY_FLOOR;

// =============================================================================
// Quantity Update
// =============================================================================

/// A quantity-change instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUpdate {
    /// A signed delta from the current quantity: `"-1"` decrements,
    /// `"+2"` increments, `"3"` (no sign) also increments.
    Relative(String),

    /// Outright replacement. No floor is enforced at this layer; that is
    /// the caller's responsibility.
    Absolute(i64),
}

impl QuantityUpdate {
    /// A relative delta from a raw string such as `"-1"` or `"+2"`.
    pub fn relative(delta: impl Into<String>) -> Self {
        QuantityUpdate::Relative(delta.into())
    }

    /// An absolute replacement.
    pub fn absolute(quantity: i64) -> Self {
        QuantityUpdate::Absolute(quantity)
    }

    /// Resolves the instruction against the current quantity.
    ///
    /// Relative decrements that would land at or below zero are refused
    /// and leave the quantity unchanged; the floor is
    /// [`QUANTITY_FLOOR`], never 0 or negative.
    pub fn apply(&self, current: i64) -> i64 {
        match self {
            QuantityUpdate::Relative(raw) => apply_relative(current, raw),
            QuantityUpdate::Absolute(quantity) => *quantity,
        }
    }
}

/// A bare value means a relative change.
impl From<i64> for QuantityUpdate {
    fn from(delta: i64) -> Self {
        QuantityUpdate::Relative(delta.to_string())
    }
}

fn apply_relative(current: i64, raw: &str) -> i64 {
    let step = parse_magnitude(raw);

    if raw.contains('-') {
        // Refuse to count down to zero or below.
        if current - step >= QUANTITY_FLOOR {
            current - step
        } else {
            current
        }
    } else {
        // '+' and unsigned values both increment.
        current + step
    }
}

/// Strips the sign characters and parses the remainder as an integer.
/// Non-numeric input normalizes to 0, making the change a no-op.
fn parse_magnitude(raw: &str) -> i64 {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '-' | '+')).collect();

    cleaned.trim().parse().unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_signs() {
        assert_eq!(QuantityUpdate::relative("-2").apply(5), 3);
        assert_eq!(QuantityUpdate::relative("+2").apply(5), 7);
        assert_eq!(QuantityUpdate::relative("2").apply(5), 7);
    }

    #[test]
    fn test_decrement_below_floor_is_a_no_op() {
        assert_eq!(QuantityUpdate::relative("-1").apply(1), 1);
        assert_eq!(QuantityUpdate::relative("-5").apply(3), 3);
        // Landing exactly on the floor is allowed.
        assert_eq!(QuantityUpdate::relative("-2").apply(3), 1);
    }

    #[test]
    fn test_absolute_replaces_outright() {
        assert_eq!(QuantityUpdate::absolute(9).apply(5), 9);
        // No floor at this layer.
        assert_eq!(QuantityUpdate::absolute(0).apply(5), 0);
    }

    #[test]
    fn test_bare_value_is_relative() {
        let update: QuantityUpdate = 3.into();
        assert_eq!(update.apply(5), 8);
        let update: QuantityUpdate = (-1).into();
        assert_eq!(update.apply(1), 1);
    }

    #[test]
    fn test_non_numeric_delta_is_a_no_op() {
        assert_eq!(QuantityUpdate::relative("lots").apply(5), 5);
    }
}
