//! # Condition Module
//!
//! Pricing adjustments ("conditions") and the engine that applies them.
//!
//! ## The Value Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  A condition value is a string matching  [+-]?\d+(\.\d+)?%?         │
//! │                                                                     │
//! │  "-10%"  subtract 10 percent of the input amount                   │
//! │  "+10%"  add 10 percent of the input amount                        │
//! │  "10%"   add 10 percent (no sign defaults to addition)             │
//! │  "-5"    subtract 5 outright                                       │
//! │  "+5"    add 5 outright                                            │
//! │  "5"     add 5 (no sign defaults to addition)                      │
//! │                                                                     │
//! │  Percentage detection and sign detection are independent textual   │
//! │  checks over the same raw string. Results clamp at 0.00.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::Cell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CartError, CartResult};
use crate::validation::validate_required;

// =============================================================================
// Target
// =============================================================================

/// Which amount a condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Applies to an individual item's unit price.
    Item,
    /// Applies to the cart subtotal.
    Subtotal,
}

// =============================================================================
// Condition
// =============================================================================

/// A named, ordered pricing adjustment.
///
/// Immutable once validated, except `order`, which the cart-level chain
/// assigns once when left at 0.
///
/// ## Example
/// ```rust
/// use carton_core::{Condition, Target};
///
/// let vat = Condition::new("VAT 12.5%", "tax", Target::Subtotal, "12.5%").unwrap();
/// assert_eq!(vat.apply(100.0), 112.5);
/// assert_eq!(vat.parsed_raw_value(), 12.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    name: String,

    /// Free-form tag ("tax", "discount", "shipping", ...) used for
    /// filtering, never for computation.
    #[serde(rename = "type")]
    condition_type: String,

    target: Target,

    /// Sign/percent-encoded adjustment, e.g. "-10%", "+5", "125".
    value: String,

    /// Position in the cart-level chain; 0 means "unassigned" and asks the
    /// owning collection to pick the next slot.
    #[serde(default)]
    order: i64,

    /// Opaque pass-through attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Value>,

    /// The absolute delta computed by the most recent `apply` run.
    /// Derived state only; never persisted.
    #[serde(skip)]
    parsed_raw_value: Cell<f64>,
}

impl Condition {
    /// Creates a validated condition.
    ///
    /// Name, type and value must be non-blank; the typed signature already
    /// guarantees a target is present and that no nested collection can be
    /// smuggled in as the argument set.
    pub fn new(
        name: impl Into<String>,
        condition_type: impl Into<String>,
        target: Target,
        value: impl Into<String>,
    ) -> CartResult<Self> {
        let condition = Condition {
            name: name.into(),
            condition_type: condition_type.into(),
            target,
            value: value.into(),
            order: 0,
            attributes: BTreeMap::new(),
            parsed_raw_value: Cell::new(0.0),
        };

        validate_required("name", &condition.name).map_err(CartError::InvalidCondition)?;
        validate_required("type", &condition.condition_type)
            .map_err(CartError::InvalidCondition)?;
        validate_required("value", &condition.value).map_err(CartError::InvalidCondition)?;

        Ok(condition)
    }

    /// Sets an explicit chain position at construction time.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Attaches a pass-through attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn condition_type(&self) -> &str {
        &self.condition_type
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The chain position. 0 means no assignment has been made yet and the
    /// owning collection should pick one.
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Assigns the chain position. Called by the collection that owns
    /// ordering when [`Condition::order`] reports 0.
    pub fn set_order(&mut self, order: i64) {
        self.order = order;
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Looks up a single pass-through attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    // -------------------------------------------------------------------------
    // The Apply Engine
    // -------------------------------------------------------------------------

    /// Applies this condition to an amount and returns the adjusted amount.
    ///
    /// ## Algorithm
    /// 1. Percentage iff the raw value contains `%`.
    /// 2. Sign is a purely textual check on the same raw string: `-` means
    ///    subtract; anything else (including unsigned percentages) adds.
    /// 3. Strip `%`, `-`, `+` and parse the remainder as a float; anything
    ///    non-numeric parses to 0.
    /// 4. Delta is `amount * clean / 100` for percentages, `clean` otherwise.
    /// 5. The delta is recorded as [`Condition::parsed_raw_value`].
    /// 6. Results below zero clamp to 0.00 — prices never go negative.
    pub fn apply(&self, amount: f64) -> f64 {
        let raw = self.value.as_str();

        let delta = if Self::is_percentage(raw) {
            amount * (Self::clean_value(raw) / 100.0)
        } else {
            Self::clean_value(raw)
        };

        self.parsed_raw_value.set(delta);

        // Sign detection is independent of the percentage check; a value
        // with no sign character defaults to addition.
        let result = if Self::is_subtraction(raw) {
            amount - delta
        } else {
            amount + delta
        };

        if result < 0.0 {
            0.00
        } else {
            result
        }
    }

    /// Runs the apply engine and returns the absolute delta it computed
    /// rather than the adjusted amount.
    pub fn calculated_value(&self, amount: f64) -> f64 {
        self.apply(amount);
        self.parsed_raw_value.get()
    }

    /// The absolute delta from the most recent [`Condition::apply`] run.
    pub fn parsed_raw_value(&self) -> f64 {
        self.parsed_raw_value.get()
    }

    fn is_percentage(value: &str) -> bool {
        value.contains('%')
    }

    fn is_subtraction(value: &str) -> bool {
        value.contains('-')
    }

    /// Strips the arithmetic markers (`%`, `-`, `+`) and parses what is
    /// left as a float. Non-numeric or empty remainders normalize to 0.
    fn clean_value(value: &str) -> f64 {
        let cleaned: String = value
            .chars()
            .filter(|c| !matches!(c, '%' | '-' | '+'))
            .collect();

        cleaned.trim().parse().unwrap_or(0.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
