//! # Store Module
//!
//! The key-value backing store a cart persists into.
//!
//! The cart keeps two collections per instance, items and cart-level
//! conditions, each under its own key derived from the instance name.
//! Collections travel as raw JSON values so any backend that can hold a
//! JSON document can hold a cart: a session bag, a cache, a database row.

use std::collections::HashMap;

use serde_json::Value;

// =============================================================================
// Store Trait
// =============================================================================

/// A minimal key-value store for cart collections.
///
/// `get` returns the raw collection last written under the key, or `None`
/// for a cart that has not persisted anything yet. Writes replace the
/// whole collection; there are no partial updates at this layer.
pub trait Store {
    fn get(&self, key: &str) -> Option<Value>;

    fn put(&mut self, key: &str, value: Value);

    /// Drops a key outright. Used by destructive resets.
    fn forget(&mut self, key: &str);
}

// =============================================================================
// Memory Store
// =============================================================================

/// HashMap-backed store for tests and single-process use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn forget(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_get_forget() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);

        store.put("a", json!([1, 2, 3]));
        assert_eq!(store.get("a"), Some(json!([1, 2, 3])));
        assert_eq!(store.len(), 1);

        store.put("a", json!([]));
        assert_eq!(store.get("a"), Some(json!([])));

        store.forget("a");
        assert_eq!(store.get("a"), None);
    }
}
