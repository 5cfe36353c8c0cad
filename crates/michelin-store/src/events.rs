//! # Store Events
//!
//! Change notifications published after every successful mutation. A
//! front end subscribes once and re-reads whatever it renders.
//!
//! ```text
//! Store::delete_cuisine("c1")
//!     │  (cuisine + its dishes removed in one &mut call)
//!     ▼
//! broadcast::Sender ──► CuisineDeleted { id: "c1", removed_dishes: [d1, d2] }
//!     │
//!     ├──► console (logs, re-renders)
//!     └──► any other subscriber
//! ```
//!
//! Failed operations and no-op deletes publish nothing.

use serde::Serialize;

/// Capacity of the event channel. Lagging subscribers lose the oldest events.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignOutReason {
    /// The client logged out.
    Logout,
    /// The admin deleted the signed-in customer.
    CustomerDeleted,
}

/// A change that has already been applied to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    CuisineAdded {
        id: String,
    },
    /// A cuisine and every dish listed under it were removed together.
    CuisineDeleted {
        id: String,
        removed_dishes: Vec<String>,
    },
    DishAdded {
        id: String,
    },
    DishDeleted {
        id: String,
    },
    CustomerAdded {
        id: String,
    },
    CustomerDeleted {
        id: String,
    },
    BalanceUpdated {
        customer_id: String,
        balance_cents: i64,
    },
    SignedIn {
        customer_id: String,
    },
    SignedOut {
        customer_id: String,
        reason: SignOutReason,
    },
    OrderPlaced {
        customer_id: String,
        total_cents: i64,
        new_balance_cents: i64,
    },
}
