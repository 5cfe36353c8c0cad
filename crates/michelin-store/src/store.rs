//! # Store
//!
//! Owns the record lists and the session, and enforces the rules that span
//! more than one record.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Unique names      no two customers share name_key(name)               │
//! │                    (checked on add; there is no rename)                │
//! │                                                                         │
//! │  Cascade           delete_cuisine(id) removes every dish with          │
//! │                    cuisine_id == id inside the same &mut call          │
//! │                                                                         │
//! │  Session           current_user() is looked up from the stored id on   │
//! │                    every read, so its balance is never stale; deleting │
//! │                    the signed-in customer ends the session             │
//! │                                                                         │
//! │  Overdraft once    checkout goes through michelin_core::settle         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single owner, `&mut self` for every write: two mutations can never
//! interleave, and a reader can never observe half of one.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use michelin_core::{
    settle, Cart, CheckoutReceipt, CoreResult, Cuisine, Customer, CustomerRole, Dish, Money,
    ReceiptLine,
};

use crate::error::{StoreError, StoreResult};
use crate::events::{SignOutReason, StoreEvent, EVENT_CHANNEL_CAPACITY};
use crate::seed::SeedData;

/// Fields for a new dish; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewDish {
    pub cuisine_id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: String,
}

/// Serializable view of the whole store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub cuisines: Vec<Cuisine>,
    pub dishes: Vec<Dish>,
    pub customers: Vec<Customer>,
    pub current_user_id: Option<String>,
}

/// Generates a new record id.
fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// The in-memory store.
#[derive(Debug)]
pub struct Store {
    cuisines: Vec<Cuisine>,
    dishes: Vec<Dish>,
    customers: Vec<Customer>,
    /// Id of the signed-in customer. The customer record is the only copy.
    session: Option<String>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Store::from_seed(SeedData::empty())
    }

    /// Creates a store loaded with the demo restaurant.
    pub fn seeded() -> Self {
        Store::from_seed(SeedData::demo())
    }

    /// Creates a store from initial record lists.
    pub fn from_seed(seed: SeedData) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        debug!(
            cuisines = seed.cuisines.len(),
            dishes = seed.dishes.len(),
            customers = seed.customers.len(),
            "Store created"
        );
        Store {
            cuisines: seed.cuisines,
            dishes: seed.dishes,
            customers: seed.customers,
            session: None,
            events,
        }
    }

    /// Subscribes to change events published after each successful mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    // =========================================================================
    // Readers
    // =========================================================================

    pub fn cuisines(&self) -> &[Cuisine] {
        &self.cuisines
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn cuisine(&self, id: &str) -> Option<&Cuisine> {
        self.cuisines.iter().find(|c| c.id == id)
    }

    pub fn dish(&self, id: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Dishes listed under a cuisine, in insertion order.
    pub fn dishes_for_cuisine(&self, cuisine_id: &str) -> Vec<&Dish> {
        self.dishes
            .iter()
            .filter(|d| d.cuisine_id == cuisine_id)
            .collect()
    }

    /// The signed-in customer, read live from the customer list.
    pub fn current_user(&self) -> Option<&Customer> {
        self.session.as_deref().and_then(|id| self.customer(id))
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// Copies every list for export.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            cuisines: self.cuisines.clone(),
            dishes: self.dishes.clone(),
            customers: self.customers.clone(),
            current_user_id: self.current_user().map(|c| c.id.clone()),
        }
    }

    // =========================================================================
    // Cuisines
    // =========================================================================

    /// Adds a cuisine. Never fails; an empty name is the form's problem.
    pub fn add_cuisine(&mut self, name: &str, description: &str) -> Cuisine {
        let cuisine = Cuisine {
            id: generate_id(),
            name: name.to_string(),
            description: description.to_string(),
        };
        debug!(id = %cuisine.id, name = %cuisine.name, "Adding cuisine");

        self.cuisines.push(cuisine.clone());
        self.publish(StoreEvent::CuisineAdded {
            id: cuisine.id.clone(),
        });
        cuisine
    }

    /// Deletes a cuisine together with every dish listed under it.
    ///
    /// Dishes pointing at `id` are removed even if the cuisine itself is
    /// already gone. Returns `false` when nothing was removed.
    pub fn delete_cuisine(&mut self, id: &str) -> bool {
        let before = self.cuisines.len();
        self.cuisines.retain(|c| c.id != id);
        let removed_cuisine = self.cuisines.len() != before;

        let mut removed_dishes = Vec::new();
        self.dishes.retain(|d| {
            if d.cuisine_id == id {
                removed_dishes.push(d.id.clone());
                false
            } else {
                true
            }
        });

        if !removed_cuisine && removed_dishes.is_empty() {
            return false;
        }

        debug!(
            id = %id,
            removed_dishes = removed_dishes.len(),
            "Deleted cuisine"
        );
        self.publish(StoreEvent::CuisineDeleted {
            id: id.to_string(),
            removed_dishes,
        });
        true
    }

    // =========================================================================
    // Dishes
    // =========================================================================

    /// Adds a dish.
    ///
    /// The cuisine id is a precondition, not checked: an unknown id is
    /// logged and the dish is stored anyway.
    pub fn add_dish(&mut self, new: NewDish) -> Dish {
        if self.cuisine(&new.cuisine_id).is_none() {
            warn!(cuisine_id = %new.cuisine_id, "Adding dish under unknown cuisine");
        }

        let dish = Dish {
            id: generate_id(),
            cuisine_id: new.cuisine_id,
            name: new.name,
            description: new.description,
            price_cents: new.price.cents(),
            image_url: new.image_url,
        };
        debug!(id = %dish.id, name = %dish.name, price = %dish.price(), "Adding dish");

        self.dishes.push(dish.clone());
        self.publish(StoreEvent::DishAdded {
            id: dish.id.clone(),
        });
        dish
    }

    /// Deletes a dish. Returns `false` if it did not exist.
    pub fn delete_dish(&mut self, id: &str) -> bool {
        let before = self.dishes.len();
        self.dishes.retain(|d| d.id != id);
        if self.dishes.len() == before {
            return false;
        }

        debug!(id = %id, "Deleted dish");
        self.publish(StoreEvent::DishDeleted { id: id.to_string() });
        true
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Registers a customer.
    ///
    /// ## Errors
    /// [`StoreError::DuplicateName`] when another customer's name matches
    /// after trimming and lowercasing. The store is left untouched.
    pub fn add_customer(
        &mut self,
        name: &str,
        role: CustomerRole,
        balance: Money,
    ) -> StoreResult<Customer> {
        let name = name.trim();
        if self.customers.iter().any(|c| c.matches_name(name)) {
            debug!(name = %name, "Rejected duplicate customer name");
            return Err(StoreError::duplicate(name));
        }

        let customer = Customer {
            id: generate_id(),
            name: name.to_string(),
            role,
            balance_cents: balance.cents(),
        };
        debug!(id = %customer.id, name = %customer.name, role = %role, "Adding customer");

        self.customers.push(customer.clone());
        self.publish(StoreEvent::CustomerAdded {
            id: customer.id.clone(),
        });
        Ok(customer)
    }

    /// Deletes a customer. If they are signed in, the session ends too.
    /// Returns `false` if the customer did not exist.
    pub fn delete_customer(&mut self, id: &str) -> bool {
        let before = self.customers.len();
        self.customers.retain(|c| c.id != id);
        if self.customers.len() == before {
            return false;
        }

        debug!(id = %id, "Deleted customer");
        self.publish(StoreEvent::CustomerDeleted { id: id.to_string() });

        if self.session.as_deref() == Some(id) {
            self.session = None;
            info!(customer_id = %id, "Signed-in customer deleted, session ended");
            self.publish(StoreEvent::SignedOut {
                customer_id: id.to_string(),
                reason: SignOutReason::CustomerDeleted,
            });
        }
        true
    }

    /// Sets a customer's balance to an absolute value.
    ///
    /// The signed-in view reads the same record, so it reflects the new
    /// balance immediately.
    pub fn update_customer_balance(&mut self, id: &str, balance: Money) -> StoreResult<Customer> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Customer", id))?;

        customer.balance_cents = balance.cents();
        let updated = customer.clone();
        debug!(id = %id, balance = %balance, "Updated customer balance");

        self.publish(StoreEvent::BalanceUpdated {
            customer_id: updated.id.clone(),
            balance_cents: updated.balance_cents,
        });
        Ok(updated)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Signs in by name, ignoring case and surrounding whitespace.
    ///
    /// ## Errors
    /// [`StoreError::NotFound`] when nobody has that name; the current
    /// session (if any) is kept.
    pub fn login(&mut self, name: &str) -> StoreResult<Customer> {
        let customer = self
            .customers
            .iter()
            .find(|c| c.matches_name(name))
            .cloned()
            .ok_or_else(|| StoreError::not_found("Customer", name.trim()))?;

        self.session = Some(customer.id.clone());
        info!(customer_id = %customer.id, name = %customer.name, "Customer signed in");
        self.publish(StoreEvent::SignedIn {
            customer_id: customer.id.clone(),
        });
        Ok(customer)
    }

    /// Ends the session. The caller owns the cart and clears it.
    /// Returns `false` if nobody was signed in.
    pub fn logout(&mut self) -> bool {
        let Some(id) = self.session.take() else {
            return false;
        };

        info!(customer_id = %id, "Customer signed out");
        self.publish(StoreEvent::SignedOut {
            customer_id: id,
            reason: SignOutReason::Logout,
        });
        true
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Places the signed-in customer's order.
    ///
    /// ## Flow
    /// ```text
    /// current_user? ──no──► NotSignedIn
    ///      │
    ///      ▼
    /// total = Σ live price × qty ──overflow──► TotalOutOfRange (cart kept)
    ///      │
    ///      ▼
    /// settle(balance, total) ──Blocked──► InsufficientFunds (cart kept)
    ///      │
    ///      ▼
    /// update_customer_balance ──► cart.clear() ──► CheckoutReceipt
    /// ```
    pub fn checkout(&mut self, cart: &mut Cart) -> StoreResult<CheckoutReceipt> {
        let customer = self.current_user().cloned().ok_or(StoreError::NotSignedIn)?;

        let lines = cart
            .priced_lines(&self.dishes)
            .iter()
            .map(|p| -> CoreResult<ReceiptLine> {
                Ok(ReceiptLine {
                    dish_id: p.dish.id.clone(),
                    name: p.dish.name.clone(),
                    unit_price_cents: p.dish.price_cents,
                    quantity: p.quantity,
                    line_total_cents: p.line_total()?.cents(),
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;
        let total = cart.total(&self.dishes)?;

        let new_balance = match settle(customer.balance(), total) {
            Ok(balance) => balance,
            Err(err) => {
                info!(
                    customer_id = %customer.id,
                    balance = %customer.balance(),
                    total = %total,
                    "Checkout refused"
                );
                return Err(err.into());
            }
        };

        self.update_customer_balance(&customer.id, new_balance)?;
        cart.clear();

        let receipt = CheckoutReceipt {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            lines,
            total_cents: total.cents(),
            previous_balance_cents: customer.balance_cents,
            new_balance_cents: new_balance.cents(),
            placed_at: Utc::now(),
        };

        info!(
            customer_id = %customer.id,
            total = %total,
            new_balance = %new_balance,
            overdrawn = receipt.overdrawn(),
            "Order placed"
        );
        self.publish(StoreEvent::OrderPlaced {
            customer_id: customer.id,
            total_cents: receipt.total_cents,
            new_balance_cents: receipt.new_balance_cents,
        });
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
