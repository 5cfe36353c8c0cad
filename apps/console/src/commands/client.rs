//! # Client Commands
//!
//! The ordering surface: sign in, browse, fill the cart, check out.
//!
//! ## Checkout Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart empty?            ──yes──► "Your cart is empty" (form check)     │
//! │       │                                                                 │
//! │  balance < 0?           ──yes──► refused, recharge at the counter      │
//! │       │                                                                 │
//! │  balance >= 0           ──────► order placed, balance -= total         │
//! │                                  (may go negative exactly once)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use michelin_core::validation::{validate_customer_name, validate_id};
use michelin_core::{CheckoutReceipt, CoreError, Customer};
use michelin_store::StoreError;

use super::{required_arg, CommandResult, Reply};
use crate::error::{ApiError, ErrorCode};
use crate::state::{AppState, View};

pub const LOGIN_HELP: &str = "\
Client login:
  login <name>                               sign in by name
  back | help | quit";

pub const HELP: &str = "\
Client commands:
  menu [<cuisine-id>]                        show dishes (select a cuisine)
  cuisines                                   list cuisines
  add <dish-id>                              add one to the cart
  remove <dish-id>                           take one out of the cart
  cart                                       show the cart
  checkout                                   place the order
  balance                                    show your balance
  logout                                     sign out (clears the cart)
  back | help | quit";

// =============================================================================
// Login View
// =============================================================================

/// Runs one command on the login view.
pub fn execute_login(state: &mut AppState, verb: &str, args: &str) -> CommandResult {
    match verb {
        "login" => login(state, args),
        _ => Err(ApiError::unknown_command(verb)),
    }
}

fn login(state: &mut AppState, args: &str) -> CommandResult {
    let name = required_arg(args, "login <name>")?;
    validate_customer_name(name)?;

    let customer = match state.store.login(name) {
        Ok(customer) => customer,
        Err(StoreError::NotFound { .. }) => {
            return Err(ApiError::new(
                ErrorCode::NotFound,
                "Customer not found. Please ask Admin to register you.",
            ))
        }
        Err(err) => return Err(err.into()),
    };

    state.cart.clear();
    state.view = View::ClientApp;

    let mut message = format!(
        "Welcome, {} ({}). Balance: {}",
        customer.name,
        customer.role,
        state.config.format_currency(customer.balance_cents)
    );
    if !customer.standing().can_checkout() {
        message.push_str("\nYour balance is negative. Please recharge at the counter before ordering.");
    }
    message.push('\n');
    message.push_str(&render_menu(state));
    Ok(Reply::Message(message))
}

// =============================================================================
// App View
// =============================================================================

/// Runs one command on the signed-in client view.
pub fn execute(state: &mut AppState, verb: &str, args: &str) -> CommandResult {
    if state.store.current_user().is_none() {
        state.enter_client();
        return Err(StoreError::NotSignedIn.into());
    }

    match verb {
        "menu" => select_menu(state, args),
        "cuisines" => Ok(list_cuisines(state)),
        "add" => add_to_cart(state, args),
        "remove" => remove_from_cart(state, args),
        "cart" => render_cart(state).map(Reply::Message),
        "checkout" => checkout(state),
        "balance" => balance(state),
        "logout" => Ok(logout(state)),
        _ => Err(ApiError::unknown_command(verb)),
    }
}

fn signed_in(state: &AppState) -> Result<&Customer, ApiError> {
    state
        .store
        .current_user()
        .ok_or_else(|| StoreError::NotSignedIn.into())
}

fn select_menu(state: &mut AppState, args: &str) -> CommandResult {
    let id = args.trim();
    if !id.is_empty() {
        if state.store.cuisine(id).is_none() {
            return Err(ApiError::not_found("Cuisine", id));
        }
        state.selected_cuisine = Some(id.to_string());
    }
    Ok(Reply::Message(render_menu(state)))
}

fn render_menu(state: &AppState) -> String {
    let Some(cuisine_id) = state.active_cuisine_id() else {
        return "The menu is empty.".to_string();
    };

    let mut out = match state.store.cuisine(&cuisine_id) {
        Some(cuisine) => format!("== {} ==  {}", cuisine.name, cuisine.description),
        None => format!("== {} ==", cuisine_id),
    };

    let dishes = state.store.dishes_for_cuisine(&cuisine_id);
    if dishes.is_empty() {
        out.push_str("\nNo dishes available in this category.");
    }
    for dish in dishes {
        out.push_str(&format!(
            "\n{}  {}  {}",
            dish.id,
            dish.name,
            state.config.format_currency(dish.price_cents)
        ));
        let in_cart = state.cart.quantity_of(&dish.id);
        if in_cart > 0 {
            out.push_str(&format!("  (x{} in cart)", in_cart));
        }
        if !dish.description.is_empty() {
            out.push_str(&format!("\n    {}", dish.description));
        }
    }
    out
}

fn list_cuisines(state: &AppState) -> Reply {
    let active = state.active_cuisine_id();
    let lines: Vec<String> = state
        .store
        .cuisines()
        .iter()
        .map(|c| {
            let marker = if active.as_deref() == Some(c.id.as_str()) {
                "*"
            } else {
                " "
            };
            format!("{} {}  {}", marker, c.id, c.name)
        })
        .collect();

    if lines.is_empty() {
        return Reply::message("No cuisines yet.");
    }
    Reply::message(lines.join("\n"))
}

fn add_to_cart(state: &mut AppState, args: &str) -> CommandResult {
    let id = required_arg(args, "add <dish-id>")?;
    validate_id(id)?;

    let name = state
        .store
        .dish(id)
        .map(|d| d.name.clone())
        .ok_or_else(|| ApiError::not_found("Dish", id))?;

    state.cart.add_item(id, 1)?;
    let total = match state.cart.total(state.store.dishes()) {
        Ok(total) => total,
        Err(err) => {
            state.cart.remove_one(id);
            return Err(err.into());
        }
    };
    debug!(dish_id = %id, items = state.cart.item_count(), "Added to cart");

    Ok(Reply::message(format!(
        "Added {} (x{} in cart). Cart total: {}",
        name,
        state.cart.quantity_of(id),
        state.config.format_currency(total.cents())
    )))
}

fn remove_from_cart(state: &mut AppState, args: &str) -> CommandResult {
    let id = required_arg(args, "remove <dish-id>")?;
    validate_id(id)?;

    if state.cart.quantity_of(id) == 0 {
        return Err(CoreError::DishNotInCart(id.to_string()).into());
    }
    let remaining = state.cart.remove_one(id);

    let name = state
        .store
        .dish(id)
        .map(|d| d.name.as_str())
        .unwrap_or(id);
    Ok(Reply::message(if remaining == 0 {
        format!("Removed {} from your cart", name)
    } else {
        format!("Removed one {} ({} left)", name, remaining)
    }))
}

fn render_cart(state: &AppState) -> Result<String, ApiError> {
    if state.cart.is_empty() {
        return Ok("Your cart is empty.".to_string());
    }

    let dishes = state.store.dishes();
    let mut out = format!("Your order ({} items)", state.cart.item_count());
    for line in state.cart.priced_lines(dishes) {
        out.push_str(&format!(
            "\n  {} x{}  {}",
            line.dish.name,
            line.quantity,
            state.config.format_currency(line.line_total()?.cents())
        ));
    }
    out.push_str(&format!(
        "\nTotal: {}",
        state.config.format_currency(state.cart.total(dishes)?.cents())
    ));

    if let Some(customer) = state.store.current_user() {
        out.push_str(&format!(
            "\nBalance: {}",
            state.config.format_currency(customer.balance_cents)
        ));
        if !customer.standing().can_checkout() {
            out.push_str("\nYour balance is negative. Checkout is disabled until you recharge at the counter.");
        }
    }
    Ok(out)
}

fn checkout(state: &mut AppState) -> CommandResult {
    if state.cart.is_empty() {
        return Err(ApiError::validation("Your cart is empty"));
    }

    let receipt = state.store.checkout(&mut state.cart)?;
    Ok(Reply::Message(render_receipt(state, &receipt)))
}

fn render_receipt(state: &AppState, receipt: &CheckoutReceipt) -> String {
    let mut out = format!(
        "Order placed! Total: {}. New Balance: {}",
        state.config.format_currency(receipt.total_cents),
        state.config.format_currency(receipt.new_balance_cents)
    );
    if receipt.overdrawn() {
        out.push_str("\nYour balance is now negative. Please recharge at the counter before your next order.");
    }
    out
}

fn balance(state: &AppState) -> CommandResult {
    let customer = signed_in(state)?;
    let status = if customer.standing().can_checkout() {
        "OK"
    } else {
        "negative, checkout disabled"
    };
    Ok(Reply::message(format!(
        "{}: {} ({})",
        customer.name,
        state.config.format_currency(customer.balance_cents),
        status
    )))
}

fn logout(state: &mut AppState) -> Reply {
    state.store.logout();
    state.cart.clear();
    state.selected_cuisine = None;
    state.view = View::ClientLogin;
    Reply::message("Signed out.")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use michelin_core::Money;
    use michelin_store::NewDish;

    fn signed_in_as(name: &str) -> AppState {
        let mut state = AppState::new(ConfigState::default());
        state.view = View::ClientLogin;
        execute_login(&mut state, "login", name).unwrap();
        state
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Message(m) => m,
            Reply::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn test_login_is_case_insensitive() {
        let state = signed_in_as("  bOB ");
        assert_eq!(state.view, View::ClientApp);
        assert_eq!(state.store.current_user().unwrap().name, "Bob");
    }

    #[test]
    fn test_login_unknown_asks_for_registration() {
        let mut state = AppState::new(ConfigState::default());
        state.view = View::ClientLogin;

        let err = execute_login(&mut state, "login", "Zed").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("register"));
        assert_eq!(state.view, View::ClientLogin);
    }

    #[test]
    fn test_bob_checkout_deducts_live_prices() {
        let mut state = signed_in_as("Bob");
        execute(&mut state, "add", "d1").unwrap();
        execute(&mut state, "add", "d1").unwrap();
        execute(&mut state, "add", "d4").unwrap();

        // 2 × 12.99 + 8.99 = 34.97
        let reply = text(execute(&mut state, "checkout", "").unwrap());
        assert!(reply.contains("$34.97"));
        assert!(reply.contains("$15.03"));
        assert!(state.cart.is_empty());
        assert_eq!(state.store.customer("u2").unwrap().balance_cents, 1503);
    }

    #[test]
    fn test_overdraft_once_then_blocked() {
        let mut state = signed_in_as("Bob");
        for _ in 0..3 {
            execute(&mut state, "add", "d3").unwrap();
        }

        let reply = text(execute(&mut state, "checkout", "").unwrap());
        assert!(reply.contains("-$16.00"));
        assert!(reply.contains("recharge"));

        execute(&mut state, "add", "d4").unwrap();
        let err = execute(&mut state, "checkout", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert_eq!(state.cart.item_count(), 1);
        assert_eq!(state.store.customer("u2").unwrap().balance_cents, -1600);
    }

    #[test]
    fn test_karen_is_blocked() {
        let mut state = signed_in_as("Karen");
        execute(&mut state, "add", "d4").unwrap();

        let err = execute(&mut state, "checkout", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert!(err.message.contains("recharge at the counter"));
        assert_eq!(state.store.customer("u3").unwrap().balance_cents, -1500);
    }

    #[test]
    fn test_empty_cart_checkout_rejected() {
        let mut state = signed_in_as("Elon");
        let err = execute(&mut state, "checkout", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.store.customer("u1").unwrap().balance_cents, 100_000);
    }

    #[test]
    fn test_remove_decrements_then_drops_line() {
        let mut state = signed_in_as("Elon");
        execute(&mut state, "add", "d2").unwrap();
        execute(&mut state, "add", "d2").unwrap();

        let reply = text(execute(&mut state, "remove", "d2").unwrap());
        assert!(reply.contains("1 left"));
        execute(&mut state, "remove", "d2").unwrap();
        assert!(state.cart.is_empty());

        let err = execute(&mut state, "remove", "d2").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_add_unknown_dish() {
        let mut state = signed_in_as("Elon");
        let err = execute(&mut state, "add", "d99").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_add_rolls_back_when_total_overflows() {
        let mut state = signed_in_as("Elon");
        let gold = state.store.add_dish(NewDish {
            cuisine_id: "c1".to_string(),
            name: "Gold Leaf Banquet".to_string(),
            description: String::new(),
            price: Money::from_cents(i64::MAX / 2 + 1),
            image_url: String::new(),
        });

        execute(&mut state, "add", &gold.id).unwrap();
        let err = execute(&mut state, "add", &gold.id).unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(state.cart.quantity_of(&gold.id), 1);
        assert!(execute(&mut state, "cart", "").is_ok());
    }

    #[test]
    fn test_menu_selects_cuisine() {
        let mut state = signed_in_as("Elon");
        let menu = text(execute(&mut state, "menu", "c2").unwrap());
        assert!(menu.contains("Dim Sum Platter"));
        assert!(!menu.contains("Mapo Tofu"));
        assert_eq!(state.selected_cuisine.as_deref(), Some("c2"));

        let err = execute(&mut state, "menu", "c9").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_logout_clears_cart() {
        let mut state = signed_in_as("Elon");
        execute(&mut state, "add", "d1").unwrap();
        execute(&mut state, "logout", "").unwrap();

        assert!(state.cart.is_empty());
        assert!(!state.store.is_signed_in());
        assert_eq!(state.view, View::ClientLogin);
    }

    #[test]
    fn test_commands_without_session_return_to_login() {
        let mut state = signed_in_as("Bob");
        state.store.logout();

        let err = execute(&mut state, "cart", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotSignedIn);
        assert_eq!(state.view, View::ClientLogin);
    }
}
