//! # michelin-core: Pure Domain Logic for Michelin
//!
//! This crate holds the record shapes and the rules that act on a single
//! record: money math, the cart, the checkout (overdraft) policy and form
//! validation. It owns no lists and performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Michelin Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (apps/console)                       │   │
//! │  │      Shell ──► Admin surface          Client surface            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    michelin-store (Store)                       │   │
//! │  │     CRUD, uniqueness, cascade delete, session, checkout         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ michelin-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ checkout  │  │   │
//! │  │   │  Cuisine  │  │   Money   │  │   Cart    │  │ Standing  │  │   │
//! │  │   │   Dish    │  │   parse   │  │ CartLine  │  │  settle   │  │   │
//! │  │   │ Customer  │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO STATE • NO I/O • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Cuisine, Dish, Customer, receipts)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Dish id → quantity mapping and its totals
//! - [`checkout`] - The overdraft-once rule
//! - [`error`] - Domain error types
//! - [`validation`] - Form-level validation
//!
//! ## Example Usage
//!
//! ```rust
//! use michelin_core::checkout::settle;
//! use michelin_core::money::Money;
//!
//! // Eligible (balance >= 0) accounts may overdraw once.
//! let balance = Money::from_cents(1000);
//! let new_balance = settle(balance, Money::from_cents(2500)).unwrap();
//! assert_eq!(new_balance.cents(), -1500);
//!
//! // ...after which they are blocked.
//! assert!(settle(new_balance, Money::from_cents(100)).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, PricedLine};
pub use checkout::{settle, AccountStanding};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct dishes allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Highest dish price a form accepts: $1,000,000.00.
///
/// `MAX_PRICE_CENTS × MAX_ITEM_QUANTITY × MAX_CART_ITEMS` fits in i64 cents.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Maximum quantity of a single dish in a cart.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;
