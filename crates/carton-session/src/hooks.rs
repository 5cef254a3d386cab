//! # Hooks Module
//!
//! Pre/post mutation hooks with veto power.
//!
//! Every mutating cart operation invokes its `before_*` hook
//! synchronously before touching state. Returning `false` aborts the
//! mutation and the public method reports failure instead of proceeding;
//! the matching `after_*` hook then never fires. Read paths never hook.

use carton_core::{Item, ItemUpdate};

// =============================================================================
// CartHooks Trait
// =============================================================================

/// Observation and veto points around cart mutations.
///
/// All methods default to permissive no-ops, so implementors override
/// only what they care about. The unit type `()` is the "no hooks"
/// implementation.
///
/// ## Example
/// ```rust
/// use carton_core::Item;
/// use carton_session::CartHooks;
///
/// struct Frozen;
///
/// impl CartHooks for Frozen {
///     fn before_add(&self, _item: &Item) -> bool {
///         false // veto every add
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait CartHooks {
    /// A cart instance came into existence.
    fn created(&self, instance_name: &str) {}

    /// About to insert a new item. Return `false` to abort.
    fn before_add(&self, item: &Item) -> bool {
        true
    }

    fn after_add(&self, item: &Item) {}

    /// About to update an existing item. Return `false` to abort.
    fn before_update(&self, item_id: &str, update: &ItemUpdate) -> bool {
        true
    }

    fn after_update(&self, item: &Item) {}

    /// About to remove an item. Return `false` to abort.
    fn before_remove(&self, item_id: &str) -> bool {
        true
    }

    fn after_remove(&self, item_id: &str) {}

    /// About to clear all items. Return `false` to abort.
    fn before_clear(&self) -> bool {
        true
    }

    fn after_clear(&self) {}
}

/// The no-hooks implementation.
impl CartHooks for () {}

// =============================================================================
// Unit Tests
// =============================================================================
