//! # carton-session: Stateful Cart Facade
//!
//! This crate binds the pure pricing engine from `carton-core` to its
//! collaborators: a key-value [`Store`], a set of [`CartHooks`] that can
//! veto mutations, and a read-only formatting configuration.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      carton-session Data Flow                       │
//! │                                                                     │
//! │  Caller                                                             │
//! │    │  cart.add(item) / cart.total() / ...                           │
//! │    ▼                                                                │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                     Cart (cart.rs)                            │ │
//! │  │                                                               │ │
//! │  │  reads:  store.get(key) ──► rehydrate Vec<Item>/<Condition>  │ │
//! │  │  writes: before_* hook ──► mutate ──► store.put ──► after_*  │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! │    │                                        │                      │
//! │    ▼                                        ▼                      │
//! │  Store (get/put/forget)                CartHooks (veto / observe)  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`cart`] - The cart facade and all public operations
//! - [`store`] - The `Store` trait and the in-memory default
//! - [`hooks`] - Pre/post mutation hooks with veto power
//!
//! ## Example
//!
//! ```rust
//! use carton_core::{Condition, FormatConfig, Item, Target};
//! use carton_session::{Cart, MemoryStore};
//!
//! let mut cart = Cart::new(MemoryStore::new(), (), "shopper-1", FormatConfig::default());
//! cart.add(Item::new("sku-1", "Notebook", 100.0, 1)).unwrap();
//! cart.add_condition(Condition::new("VAT", "tax", Target::Subtotal, "+10%").unwrap());
//!
//! assert_eq!(cart.total(), 110.0);
//! assert_eq!(cart.total_formatted(), "110.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod hooks;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::Cart;
pub use hooks::CartHooks;
pub use store::{MemoryStore, Store};
