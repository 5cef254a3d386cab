//! # carton-core: Pure Pricing Logic for carton
//!
//! This crate is the **heart** of carton. It contains the condition
//! computation engine and item pricing as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       carton Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 carton-session (facade)                     │   │
//! │  │    Cart ──► Store (get/put/forget) ──► CartHooks (veto)    │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              ★ carton-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌─────────┐ │   │
//! │  │   │ condition │  │   item    │  │ quantity  │  │ format  │ │   │
//! │  │   │ Condition │  │   Item    │  │  updates  │  │ config  │ │   │
//! │  │   │  Target   │  │  pricing  │  │ rel/abs   │  │ output  │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────────┘ │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO STORAGE • NO EVENTS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`condition`] - Pricing adjustments (`Condition`, `Target`) and the
//!   apply engine
//! - [`item`] - Cart line items and per-item condition folds
//! - [`quantity`] - Relative/absolute quantity update interpretation
//! - [`format`] - Locale-style number formatting at output boundaries
//! - [`validation`] - Field validation (required / numeric / min rules)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every pricing fold is deterministic
//! 2. **No I/O**: Storage and event dispatch live in carton-session
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Formatting at the boundary**: Folds run on raw `f64`; formatting
//!    happens once, at the outermost accessor
//!
//! ## Example Usage
//!
//! ```rust
//! use carton_core::{Condition, Item, Target};
//!
//! let discount = Condition::new("SALE 10%", "discount", Target::Item, "-10%").unwrap();
//! let item = Item::new("sku-1", "Pocket Radio", 100.0, 2).with_condition(discount);
//!
//! // 100 - 10% = 90 per unit, times two units
//! assert_eq!(item.price_with_conditions(), 90.0);
//! assert_eq!(item.price_sum_with_conditions(), 180.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod condition;
pub mod error;
pub mod format;
pub mod item;
pub mod quantity;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use carton_core::Condition` instead of
// `use carton_core::condition::Condition`

pub use condition::{Condition, Target};
pub use error::{CartError, CartResult, ValidationError};
pub use format::FormatConfig;
pub use item::{Item, ItemUpdate};
pub use quantity::QuantityUpdate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The smallest quantity an item in a cart may hold.
///
/// Relative decrements that would land at or below zero are refused; an
/// item leaves the cart through removal, never by counting down to nothing.
pub const QUANTITY_FLOOR: i64 = 1;
