//! # State Module
//!
//! Everything one console session owns.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         AppState                                │   │
//! │  │                                                                 │   │
//! │  │  store ──────────► Store (cuisines, dishes, customers, session) │   │
//! │  │  cart  ──────────► Cart  (client's pending order)               │   │
//! │  │  view  ──────────► View  (Landing / Admin / ClientLogin / App)  │   │
//! │  │  selected_cuisine  menu section the client is browsing          │   │
//! │  │  config ─────────► ConfigState (read-only)                      │   │
//! │  │  events ◄───────── Store::subscribe()                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  After every command the shell calls drain_events(), which reacts to   │
//! │  changes made from another view (e.g. the admin deleting the          │
//! │  signed-in customer ends the client session and discards its cart).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One command runs at a time on the owning thread, so plain ownership is
//! enough here.

mod config;
mod view;

pub use config::ConfigState;
pub use view::View;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use michelin_core::Cart;
use michelin_store::{SeedData, Store, StoreEvent};

/// State of one console session.
#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    pub cart: Cart,
    pub view: View,
    /// Cuisine id the client menu is showing.
    pub selected_cuisine: Option<String>,
    pub config: ConfigState,
    events: broadcast::Receiver<StoreEvent>,
}

impl AppState {
    /// Builds the session, seeding the demo restaurant if configured.
    pub fn new(config: ConfigState) -> Self {
        let seed = if config.seed_demo_data {
            SeedData::demo()
        } else {
            SeedData::empty()
        };
        AppState::with_store(Store::from_seed(seed), config)
    }

    /// Builds the session around an existing store.
    pub fn with_store(store: Store, config: ConfigState) -> Self {
        let events = store.subscribe();
        AppState {
            store,
            cart: Cart::new(),
            view: View::Landing,
            selected_cuisine: None,
            config,
            events,
        }
    }

    /// Opens the client surface.
    ///
    /// Without a session this is the login view, and any cart left over
    /// from an ended session is discarded.
    pub fn enter_client(&mut self) -> View {
        if self.store.is_signed_in() {
            self.view = View::ClientApp;
        } else {
            if !self.cart.is_empty() {
                debug!(items = self.cart.item_count(), "Discarding cart without a session");
            }
            self.cart.clear();
            self.view = View::ClientLogin;
        }
        self.view
    }

    /// The cuisine the client menu shows: the selection if it still
    /// exists, otherwise the first cuisine.
    pub fn active_cuisine_id(&self) -> Option<String> {
        self.selected_cuisine
            .as_deref()
            .filter(|id| self.store.cuisine(id).is_some())
            .or_else(|| self.store.cuisines().first().map(|c| c.id.as_str()))
            .map(str::to_string)
    }

    /// Applies pending store events to the session. Returns how many were read.
    pub fn drain_events(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    count += 1;
                    debug!(?event, "Store event");
                    self.apply_event(&event);
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event receiver lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        count
    }

    fn apply_event(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::SignedOut {
                customer_id,
                reason,
            } => {
                info!(customer_id = %customer_id, ?reason, "Session ended");
                self.cart.clear();
                if self.view == View::ClientApp {
                    self.view = View::ClientLogin;
                }
            }
            StoreEvent::CuisineDeleted { id, .. } => {
                if self.selected_cuisine.as_deref() == Some(id.as_str()) {
                    self.selected_cuisine = None;
                }
            }
            _ => {}
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_state() -> AppState {
        AppState::new(ConfigState::default())
    }

    #[test]
    fn test_new_respects_seed_flag() {
        assert_eq!(demo_state().store.customers().len(), 3);

        let config = ConfigState {
            seed_demo_data: false,
            ..ConfigState::default()
        };
        let state = AppState::new(config);
        assert!(state.store.cuisines().is_empty());
    }

    #[test]
    fn test_deleting_signed_in_customer_ends_client_session() {
        let mut state = demo_state();
        state.store.login("Bob").unwrap();
        state.view = View::ClientApp;
        state.cart.add_item("d1", 2).unwrap();
        state.drain_events();

        state.store.delete_customer("u2");
        assert_eq!(state.drain_events(), 2);

        assert!(state.cart.is_empty());
        assert_eq!(state.view, View::ClientLogin);
    }

    #[test]
    fn test_enter_client_without_session_discards_cart() {
        let mut state = demo_state();
        state.cart.add_item("d4", 1).unwrap();

        assert_eq!(state.enter_client(), View::ClientLogin);
        assert!(state.cart.is_empty());

        state.store.login("Elon").unwrap();
        assert_eq!(state.enter_client(), View::ClientApp);
    }

    #[test]
    fn test_active_cuisine_falls_back_to_first() {
        let mut state = demo_state();
        assert_eq!(state.active_cuisine_id().as_deref(), Some("c1"));

        state.selected_cuisine = Some("c2".to_string());
        assert_eq!(state.active_cuisine_id().as_deref(), Some("c2"));

        state.store.delete_cuisine("c2");
        state.drain_events();
        assert_eq!(state.selected_cuisine, None);
        assert_eq!(state.active_cuisine_id().as_deref(), Some("c1"));
    }
}
