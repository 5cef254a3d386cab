//! # Item Module
//!
//! Cart line items and the per-item condition fold.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  unit price                                                         │
//! │      │                                                              │
//! │      ▼                                                              │
//! │  fold item-targeted conditions, in collection order                 │
//! │  (subtotal-targeted conditions attached to an item are skipped;     │
//! │   the running value carries across skips)                           │
//! │      │                                                              │
//! │      ▼                                                              │
//! │  price_with_conditions ──► × quantity ──► price_sum_with_conditions │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item-level conditions fold in raw collection order, NOT by their
//! `order` field. Only the cart-level chain sorts; items keep the order
//! they were attached in.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::condition::{Condition, Target};
use crate::error::ValidationError;
use crate::format::{format_amount, FormatConfig};
use crate::quantity::QuantityUpdate;
use crate::validation::{validate_price, validate_quantity, validate_required};

// =============================================================================
// Item
// =============================================================================

/// A line item in a cart.
///
/// Fields are validated via [`Item::validate`] before the item enters a
/// cart; the struct itself stays an open value object the way the session
/// layer round-trips it through storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique key within a cart.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price. Non-negative.
    pub price: f64,

    /// Quantity. At least 1.
    pub quantity: i64,

    /// Opaque pass-through attributes (size, color, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,

    /// Conditions attached to this item. Stored data may hold either a
    /// single condition object or a list; both rehydrate into this vec.
    #[serde(default, deserialize_with = "one_or_many")]
    pub conditions: Vec<Condition>,
}

impl Item {
    /// Creates a bare item. Validation happens when it enters a cart.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            attributes: BTreeMap::new(),
            conditions: Vec::new(),
        }
    }

    /// Attaches a pass-through attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Attaches a single condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Replaces the condition set.
    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Checks the add-time invariants: id and name present, price numeric
    /// and non-negative, quantity at least 1. First failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("id", &self.id)?;
        validate_required("name", &self.name)?;
        validate_price(self.price)?;
        validate_quantity(self.quantity)?;

        Ok(())
    }

    /// Looks up a single pass-through attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// True iff at least one condition is attached.
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// The unit price with item-targeted conditions folded in, in
    /// collection order. Conditions targeting the subtotal have no
    /// per-item effect and are skipped without breaking the chain.
    pub fn price_with_conditions(&self) -> f64 {
        let mut price = self.price;

        for condition in &self.conditions {
            if condition.target() == Target::Item {
                price = condition.apply(price);
            }
        }

        price
    }

    /// Line total before conditions: unit price × quantity.
    pub fn price_sum(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Line total with conditions: conditioned unit price × quantity.
    pub fn price_sum_with_conditions(&self) -> f64 {
        self.price_with_conditions() * self.quantity as f64
    }

    // -------------------------------------------------------------------------
    // Formatted boundary accessors
    // -------------------------------------------------------------------------

    /// Formatted unit price.
    pub fn price_formatted(&self, config: &FormatConfig) -> String {
        format_amount(self.price, config)
    }

    /// Formatted conditioned unit price.
    pub fn price_with_conditions_formatted(&self, config: &FormatConfig) -> String {
        format_amount(self.price_with_conditions(), config)
    }

    /// Formatted line total before conditions.
    pub fn price_sum_formatted(&self, config: &FormatConfig) -> String {
        format_amount(self.price_sum(), config)
    }

    /// Formatted line total with conditions.
    pub fn price_sum_with_conditions_formatted(&self, config: &FormatConfig) -> String {
        format_amount(self.price_sum_with_conditions(), config)
    }
}

/// Accepts either one condition object or a list of them. Older persisted
/// carts stored a lone condition bare instead of as a one-element list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Condition>),
        One(Box<Condition>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(conditions) => conditions,
        OneOrMany::One(condition) => vec![*condition],
    })
}

// =============================================================================
// Item Update
// =============================================================================

/// A partial update for an item already in a cart.
///
/// Only the populated fields change; `quantity` carries its own
/// relative/absolute semantics (see [`QuantityUpdate`]).
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<QuantityUpdate>,
    pub attributes: Option<BTreeMap<String, Value>>,
    pub conditions: Option<Vec<Condition>>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: QuantityUpdate) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn attributes(mut self, attributes: BTreeMap<String, Value>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Applies the populated fields onto an item in place.
    pub fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity.apply(item.quantity);
        }
        if let Some(attributes) = self.attributes {
            item.attributes = attributes;
        }
        if let Some(conditions) = self.conditions {
            item.conditions = conditions;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_condition(name: &str, value: &str) -> Condition {
        Condition::new(name, "discount", Target::Item, value).unwrap()
    }

    #[test]
    fn test_price_sum_without_conditions() {
        let item = Item::new("1", "Notebook", 12.5, 4);
        assert!(!item.has_conditions());
        assert_eq!(item.price_sum(), 50.0);
        assert_eq!(item.price_sum_with_conditions(), 50.0);
    }

    #[test]
    fn test_single_item_condition() {
        let item = Item::new("1", "Notebook", 100.0, 2)
            .with_condition(item_condition("SALE", "-10%"));
        assert_eq!(item.price_with_conditions(), 90.0);
        assert_eq!(item.price_sum_with_conditions(), 180.0);
    }

    #[test]
    fn test_subtotal_condition_on_item_has_no_effect() {
        let stray = Condition::new("VAT", "tax", Target::Subtotal, "+12%").unwrap();
        let item = Item::new("1", "Notebook", 100.0, 1).with_condition(stray);
        assert!(item.has_conditions());
        assert_eq!(item.price_with_conditions(), 100.0);
    }

    #[test]
    fn test_conditions_fold_in_collection_order() {
        // (100 - 5) then +10% = 104.5; order fields are ignored at item level.
        let item = Item::new("1", "Notebook", 100.0, 1)
            .with_condition(item_condition("OFF5", "-5").with_order(9))
            .with_condition(item_condition("UP10", "+10%").with_order(1));
        assert_eq!(item.price_with_conditions(), 104.5);
    }

    #[test]
    fn test_skipped_condition_does_not_break_chain() {
        let stray = Condition::new("VAT", "tax", Target::Subtotal, "+50%").unwrap();
        let item = Item::new("1", "Notebook", 100.0, 1)
            .with_condition(item_condition("OFF5", "-5"))
            .with_condition(stray)
            .with_condition(item_condition("UP10", "+10%"));
        assert_eq!(item.price_with_conditions(), 104.5);
    }

    #[test]
    fn test_validate() {
        assert!(Item::new("1", "Notebook", 9.99, 1).validate().is_ok());
        assert!(Item::new("", "Notebook", 9.99, 1).validate().is_err());
        assert!(Item::new("1", "", 9.99, 1).validate().is_err());
        assert!(Item::new("1", "Notebook", -1.0, 1).validate().is_err());
        assert!(Item::new("1", "Notebook", 9.99, 0).validate().is_err());
    }

    #[test]
    fn test_formatted_at_boundary_only() {
        let config = FormatConfig::default();
        let item = Item::new("1", "Notebook", 1250.0, 2)
            .with_condition(item_condition("SALE", "-10%"));
        assert_eq!(item.price_with_conditions_formatted(&config), "1,125.00");
        assert_eq!(item.price_sum_with_conditions_formatted(&config), "2,250.00");
    }

    #[test]
    fn test_deserializes_single_condition_form() {
        let raw = json!({
            "id": "1",
            "name": "Notebook",
            "price": 100.0,
            "quantity": 1,
            "conditions": {
                "name": "SALE",
                "type": "discount",
                "target": "item",
                "value": "-10%"
            }
        });
        let item: Item = serde_json::from_value(raw).unwrap();
        assert_eq!(item.conditions.len(), 1);
        assert_eq!(item.price_with_conditions(), 90.0);
    }

    #[test]
    fn test_deserializes_condition_list_form() {
        let raw = json!({
            "id": "1",
            "name": "Notebook",
            "price": 100.0,
            "quantity": 1,
            "conditions": [
                { "name": "A", "type": "discount", "target": "item", "value": "-5" },
                { "name": "B", "type": "markup", "target": "item", "value": "+10%" }
            ]
        });
        let item: Item = serde_json::from_value(raw).unwrap();
        assert_eq!(item.conditions.len(), 2);
        assert_eq!(item.price_with_conditions(), 104.5);
    }

    #[test]
    fn test_update_applies_partial_fields() {
        let mut item = Item::new("1", "Notebook", 100.0, 2);
        ItemUpdate::new()
            .price(80.0)
            .quantity(QuantityUpdate::relative("+3"))
            .apply_to(&mut item);
        assert_eq!(item.name, "Notebook");
        assert_eq!(item.price, 80.0);
        assert_eq!(item.quantity, 5);
    }

    #[test]
    fn test_attributes_round_trip() {
        let item = Item::new("1", "Notebook", 100.0, 1)
            .with_attribute("color", json!("red"))
            .with_attribute("pages", json!(96));
        let json = serde_json::to_value(&item).unwrap();
        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back.attribute("color"), Some(&json!("red")));
        assert_eq!(back.attribute("pages"), Some(&json!(96)));
    }
}
