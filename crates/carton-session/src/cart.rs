//! # Cart Facade
//!
//! The cart itself: an ordered collection of items plus an ordered chain
//! of cart-level conditions, persisted through a [`Store`] and guarded by
//! [`CartHooks`].
//!
//! ## Persistence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  One cart instance = two store keys                                 │
//! │                                                                     │
//! │  "{instance}_cart_items"       ──► Vec<Item>    (insertion order)  │
//! │  "{instance}_cart_conditions"  ──► Vec<Condition> (sorted by order)│
//! │                                                                     │
//! │  Every read rehydrates the full collection from the store.          │
//! │  Every mutation writes the full collection back before returning.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One logical owner per instance; callers needing cross-process
//! consistency serialize access externally.

use carton_core::{
    format::format_amount, CartError, CartResult, Condition, FormatConfig, Item, ItemUpdate,
    QuantityUpdate, Target,
};
use tracing::{debug, warn};

use crate::hooks::CartHooks;
use crate::store::Store;

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart bound to a store, hooks and a formatting config.
///
/// See the crate docs for a usage example.
pub struct Cart<S: Store, H: CartHooks> {
    store: S,
    hooks: H,
    instance_name: String,
    items_key: String,
    conditions_key: String,
    config: FormatConfig,
}

impl<S: Store, H: CartHooks> Cart<S, H> {
    /// Creates a cart over `store`, keyed by `instance_name`.
    ///
    /// Fires the `created` hook. The config is read-only from here on.
    pub fn new(
        store: S,
        hooks: H,
        instance_name: impl Into<String>,
        config: FormatConfig,
    ) -> Self {
        let instance_name = instance_name.into();
        let cart = Cart {
            items_key: format!("{instance_name}_cart_items"),
            conditions_key: format!("{instance_name}_cart_conditions"),
            store,
            hooks,
            instance_name,
            config,
        };

        cart.hooks.created(&cart.instance_name);
        cart
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Item reads
    // -------------------------------------------------------------------------

    /// All items, rehydrated from the store in insertion order.
    pub fn content(&self) -> Vec<Item> {
        self.load_items()
    }

    /// Looks up an item by id.
    pub fn get(&self, item_id: &str) -> Option<Item> {
        self.load_items().into_iter().find(|item| item.id == item_id)
    }

    /// Checks whether an item id exists in the cart.
    pub fn has(&self, item_id: &str) -> bool {
        self.load_items().iter().any(|item| item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.load_items().is_empty()
    }

    /// Total quantity across all items.
    pub fn total_quantity(&self) -> i64 {
        self.load_items().iter().map(|item| item.quantity).sum()
    }

    // -------------------------------------------------------------------------
    // Item mutations
    // -------------------------------------------------------------------------

    /// Adds an item to the cart.
    ///
    /// ## Behavior
    /// - Validation failures raise [`CartError::InvalidItem`] carrying the
    ///   first validator message.
    /// - An id already in the cart routes through the update path with a
    ///   relative quantity, so adding the same item twice merges
    ///   quantities.
    /// - A `before_add` veto returns `Ok(false)` with state untouched.
    pub fn add(&mut self, item: Item) -> CartResult<bool> {
        item.validate().map_err(CartError::InvalidItem)?;

        if self.has(&item.id) {
            debug!(id = %item.id, "Item already in cart, merging via update");
            let id = item.id.clone();
            let update = ItemUpdate::new()
                .name(item.name)
                .price(item.price)
                .quantity(QuantityUpdate::relative(item.quantity.to_string()))
                .attributes(item.attributes)
                .conditions(item.conditions);
            return Ok(self.update(&id, update));
        }

        if !self.hooks.before_add(&item) {
            debug!(id = %item.id, "Add vetoed by hook");
            return Ok(false);
        }

        debug!(id = %item.id, quantity = item.quantity, "Adding item to cart");
        let mut items = self.load_items();
        items.push(item.clone());
        self.save_items(&items);

        self.hooks.after_add(&item);
        Ok(true)
    }

    /// Adds several items; stops at the first validation failure.
    /// Vetoed rows are skipped, matching single-item `add`.
    pub fn add_all(&mut self, items: Vec<Item>) -> CartResult<()> {
        for item in items {
            self.add(item)?;
        }

        Ok(())
    }

    /// Applies a partial update to an existing item.
    ///
    /// Returns `false` when vetoed by `before_update` or when the id is
    /// not in the cart; both leave state unchanged.
    pub fn update(&mut self, item_id: &str, update: ItemUpdate) -> bool {
        if !self.hooks.before_update(item_id, &update) {
            debug!(id = %item_id, "Update vetoed by hook");
            return false;
        }

        let mut items = self.load_items();
        let Some(item) = items.iter_mut().find(|item| item.id == item_id) else {
            return false;
        };

        update.apply_to(item);
        let updated = item.clone();

        debug!(id = %item_id, quantity = updated.quantity, "Updating cart item");
        self.save_items(&items);

        self.hooks.after_update(&updated);
        true
    }

    /// Removes an item by id. Returns `false` when vetoed or not found.
    pub fn remove(&mut self, item_id: &str) -> bool {
        if !self.hooks.before_remove(item_id) {
            debug!(id = %item_id, "Remove vetoed by hook");
            return false;
        }

        let mut items = self.load_items();
        let count_before = items.len();
        items.retain(|item| item.id != item_id);
        if items.len() == count_before {
            return false;
        }

        debug!(id = %item_id, "Removing item from cart");
        self.save_items(&items);

        self.hooks.after_remove(item_id);
        true
    }

    /// Clears all items. Cart-level conditions survive.
    /// Returns `false` when vetoed by `before_clear`.
    pub fn clear(&mut self) -> bool {
        if !self.hooks.before_clear() {
            debug!("Clear vetoed by hook");
            return false;
        }

        debug!("Clearing cart items");
        self.save_items(&[]);

        self.hooks.after_clear();
        true
    }

    /// Drops both collections from the store outright.
    pub fn destroy(&mut self) {
        debug!(instance = %self.instance_name, "Destroying cart state");
        self.store.forget(&self.items_key);
        self.store.forget(&self.conditions_key);
    }

    // -------------------------------------------------------------------------
    // Cart-level conditions
    // -------------------------------------------------------------------------

    /// Adds a condition to the cart-level chain.
    ///
    /// An unassigned `order` (0) is auto-assigned previous-max + 1, or 1
    /// for an empty chain. Names are unique: re-adding a name overwrites.
    /// The chain is re-sorted ascending by order after every insert.
    pub fn add_condition(&mut self, mut condition: Condition) {
        let mut conditions = self.load_conditions();

        if condition.order() == 0 {
            let next = conditions.last().map_or(1, |last| last.order() + 1);
            condition.set_order(next);
        }

        debug!(name = %condition.name(), order = condition.order(), "Adding cart condition");

        if let Some(existing) = conditions
            .iter_mut()
            .find(|existing| existing.name() == condition.name())
        {
            *existing = condition;
        } else {
            conditions.push(condition);
        }

        // Stable sort: equal orders keep their insertion order.
        conditions.sort_by_key(Condition::order);
        self.save_conditions(&conditions);
    }

    /// Adds several conditions in one go.
    pub fn add_conditions(&mut self, conditions: Vec<Condition>) {
        for condition in conditions {
            self.add_condition(condition);
        }
    }

    /// The cart-level chain, ascending by order.
    pub fn conditions(&self) -> Vec<Condition> {
        self.load_conditions()
    }

    /// Looks up a cart-level condition by name.
    pub fn get_condition(&self, name: &str) -> Option<Condition> {
        self.load_conditions()
            .into_iter()
            .find(|condition| condition.name() == name)
    }

    /// Cart-level conditions with the given type tag. Item-level
    /// conditions are never considered.
    pub fn conditions_by_type(&self, condition_type: &str) -> Vec<Condition> {
        self.load_conditions()
            .into_iter()
            .filter(|condition| condition.condition_type() == condition_type)
            .collect()
    }

    /// Removes all cart-level conditions with the given type tag.
    /// Item-level conditions are never touched.
    pub fn remove_conditions_by_type(&mut self, condition_type: &str) {
        debug!(condition_type, "Removing cart conditions by type");
        let mut conditions = self.load_conditions();
        conditions.retain(|condition| condition.condition_type() != condition_type);
        self.save_conditions(&conditions);
    }

    /// Removes a cart-level condition by name.
    pub fn remove_condition(&mut self, name: &str) {
        debug!(name, "Removing cart condition");
        let mut conditions = self.load_conditions();
        conditions.retain(|condition| condition.name() != name);
        self.save_conditions(&conditions);
    }

    /// Drops the whole cart-level chain. Item-level conditions survive.
    pub fn clear_conditions(&mut self) {
        debug!("Clearing cart conditions");
        self.save_conditions(&[]);
    }

    // -------------------------------------------------------------------------
    // Item-level conditions
    // -------------------------------------------------------------------------

    /// Appends a condition to an existing item, through the update path.
    /// Returns `false` when the id is not in the cart.
    pub fn add_item_condition(&mut self, item_id: &str, condition: Condition) -> bool {
        let Some(item) = self.get(item_id) else {
            return false;
        };

        debug!(id = %item_id, name = %condition.name(), "Adding item condition");
        let mut conditions = item.conditions;
        conditions.push(condition);
        self.update(item_id, ItemUpdate::new().conditions(conditions))
    }

    /// Removes a condition from an item by name.
    /// Returns `false` when the id is not in the cart.
    pub fn remove_item_condition(&mut self, item_id: &str, condition_name: &str) -> bool {
        let Some(item) = self.get(item_id) else {
            return false;
        };

        debug!(id = %item_id, name = %condition_name, "Removing item condition");
        let mut conditions = item.conditions;
        conditions.retain(|condition| condition.name() != condition_name);
        self.update(item_id, ItemUpdate::new().conditions(conditions))
    }

    /// Removes all conditions from an item.
    /// Returns `false` when the id is not in the cart.
    pub fn clear_item_conditions(&mut self, item_id: &str) -> bool {
        if !self.has(item_id) {
            return false;
        }

        debug!(id = %item_id, "Clearing item conditions");
        self.update(item_id, ItemUpdate::new().conditions(Vec::new()))
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of conditioned line totals across all items.
    pub fn sub_total(&self) -> f64 {
        self.load_items()
            .iter()
            .map(Item::price_sum_with_conditions)
            .sum()
    }

    /// Subtotal rendered through the formatting config.
    pub fn sub_total_formatted(&self) -> String {
        format_amount(self.sub_total(), &self.config)
    }

    /// The subtotal with cart-level conditions folded in.
    ///
    /// Conditions targeting the subtotal chain in ascending order: the
    /// first applies to the subtotal, each subsequent one to the previous
    /// step's output. With no subtotal conditions this is the subtotal.
    pub fn total(&self) -> f64 {
        let sub_total = self.sub_total();

        let mut total = sub_total;
        for condition in self
            .load_conditions()
            .iter()
            .filter(|condition| condition.target() == Target::Subtotal)
        {
            total = condition.apply(total);
        }

        total
    }

    /// Total rendered through the formatting config.
    pub fn total_formatted(&self) -> String {
        format_amount(self.total(), &self.config)
    }

    // -------------------------------------------------------------------------
    // Persistence plumbing
    // -------------------------------------------------------------------------

    fn load_items(&self) -> Vec<Item> {
        self.load_collection(&self.items_key)
    }

    fn load_conditions(&self) -> Vec<Condition> {
        self.load_collection(&self.conditions_key)
    }

    fn load_collection<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };

        match serde_json::from_value(raw) {
            Ok(collection) => collection,
            Err(error) => {
                warn!(key, %error, "Stored cart collection failed to rehydrate, treating as empty");
                Vec::new()
            }
        }
    }

    fn save_items(&mut self, items: &[Item]) {
        Self::save_collection(&mut self.store, &self.items_key, items);
    }

    fn save_conditions(&mut self, conditions: &[Condition]) {
        Self::save_collection(&mut self.store, &self.conditions_key, conditions);
    }

    fn save_collection<T: serde::Serialize>(store: &mut S, key: &str, collection: &[T]) {
        match serde_json::to_value(collection) {
            Ok(value) => store.put(key, value),
            Err(error) => warn!(key, %error, "Failed to serialize cart collection"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
