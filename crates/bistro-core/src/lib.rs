//! # bistro-core: Pure Session Logic for the Bistro Menu
//!
//! This crate is the **heart** of the Bistro front-end state. It contains
//! the menu, cart, preference and AR-stub logic as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI Layer (external)                          │   │
//! │  │    Menu Grid ──► Item Detail ──► Cart Drawer ──► AR Viewer      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              bistro-store (RestaurantStore host)                │   │
//! │  │    performs Effects: storage writes, notices, menu fetches      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌──────┐   │   │
//! │  │   │  types  │ │  cart   │ │ catalog │ │preferences│ │  ar  │   │   │
//! │  │   │MenuItem │ │  Cart   │ │ Filter  │ │ Favorites │ │ stub │   │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └───────────┘ └──────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Restaurant, CustomizationChoice)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart lines, merging and totals
//! - [`catalog`] - Search, filter and menu utilities
//! - [`preferences`] - Favorites and recently viewed
//! - [`ar`] - AR model descriptors and the session log
//! - [`state`] - The session state container and its effects
//! - [`sample`] - Fixed demo catalog
//! - [`validation`] - Row validation for loaded menu data
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::cart::Cart;
//! use bistro_core::sample;
//! use bistro_core::types::CustomizationChoice;
//!
//! let pasta = sample::menu_items().remove(0);
//! let extra = vec![CustomizationChoice::new("extra-truffle", "Extra truffle", 200)];
//!
//! let mut cart = Cart::new();
//! cart.add(&pasta, extra.clone(), None).unwrap();
//! cart.add(&pasta, extra, None).unwrap();
//!
//! assert_eq!(cart.lines().len(), 1);
//! assert_eq!(cart.item_count(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod ar;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod preferences;
pub mod sample;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use state::{Effect, Effects, Notice, NoticeLevel, SessionState, Snapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Establishment loaded when no other is configured.
pub const DEFAULT_RESTAURANT_ID: &str = "default-restaurant";

/// Theme used until the user picks one.
pub const DEFAULT_THEME: &str = "modern";

/// How many ids the recently-viewed list keeps.
pub const RECENTLY_VIEWED_LIMIT: usize = 10;

/// How many AR sessions the local log keeps.
pub const AR_SESSION_LOG_LIMIT: usize = 100;

/// Storage keys for the persisted session slices.
pub mod keys {
    pub const THEME: &str = "restaurant-theme";
    pub const FAVORITES: &str = "restaurant-favorites";
    pub const RECENTLY_VIEWED: &str = "restaurant-recently-viewed";
    pub const CART: &str = "restaurant-cart";
    pub const AR_SESSIONS: &str = "ar-sessions";
}
