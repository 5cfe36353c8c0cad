//! # michelin-store: In-Memory Store for Michelin
//!
//! The single owner of cuisines, dishes, customers and the signed-in
//! session. Every mutation goes through [`Store`], which enforces the
//! cross-record rules and publishes a [`StoreEvent`] afterwards.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Michelin Data Flow                               │
//! │                                                                         │
//! │  Console command (add-customer, checkout, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  michelin-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │    Events     │    │     Seed     │  │   │
//! │  │   │  (store.rs)   │───►│  (events.rs)  │    │  (seed.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Vec<Cuisine>  │    │ broadcast::   │    │ demo menu +  │  │   │
//! │  │   │ Vec<Dish>     │    │   Sender      │    │ customers    │  │   │
//! │  │   │ Vec<Customer> │    │               │    │              │  │   │
//! │  │   │ session       │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  michelin-core (Money, Cart, settle, records)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use michelin_core::{Cart, CustomerRole, Money};
//! use michelin_store::{NewDish, Store};
//!
//! let mut store = Store::new();
//! let sichuan = store.add_cuisine("Sichuan", "Spicy and numbing");
//! let tofu = store.add_dish(NewDish {
//!     cuisine_id: sichuan.id.clone(),
//!     name: "Mapo Tofu".into(),
//!     description: String::new(),
//!     price: Money::from_cents(1299),
//!     image_url: String::new(),
//! });
//! store
//!     .add_customer("Bob", CustomerRole::Regular, Money::from_cents(5000))
//!     .unwrap();
//!
//! store.login(" bob ").unwrap();
//! let mut cart = Cart::new();
//! cart.add_item(&tofu.id, 1).unwrap();
//!
//! let receipt = store.checkout(&mut cart).unwrap();
//! assert_eq!(receipt.new_balance_cents, 3701);
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod events;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use events::{SignOutReason, StoreEvent};
pub use seed::SeedData;
pub use store::{NewDish, Store, StoreSnapshot};
