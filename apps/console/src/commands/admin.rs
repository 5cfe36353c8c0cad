//! # Admin Commands
//!
//! The management surface: cuisines, dishes and customers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  admin> add-cuisine Sichuan; Spicy and numbing flavors                 │
//! │  admin> add-dish c1; Mapo Tofu; 12.99; Tofu in chili sauce             │
//! │  admin> add-customer Bob; regular                                      │
//! │  admin> set-balance <customer-id> 50                                   │
//! │                                                                         │
//! │  Form checks (required names, parseable non-negative price, known      │
//! │  cuisine) happen here; the store enforces the cross-record rules       │
//! │  (unique customer names, cascade delete, session end).                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;
use uuid::Uuid;

use michelin_core::validation::{
    validate_cuisine_name, validate_customer_name, validate_dish_name, validate_id,
    validate_price_cents,
};
use michelin_core::{CustomerRole, Money};
use michelin_store::NewDish;

use super::{required_arg, split_fields, CommandResult, Reply};
use crate::error::ApiError;
use crate::state::AppState;

pub const HELP: &str = "\
Admin commands:
  cuisines                                   list cuisines
  add-cuisine <name>[; <description>]        add a cuisine
  delete-cuisine <id>                        delete a cuisine and its dishes
  dishes                                     list dishes
  add-dish <cuisine-id>; <name>; <price>[; <description>[; <image-url>]]
  delete-dish <id>                           delete a dish
  customers                                  list customers
  add-customer <name>[; <role>]              register a customer (balance 0)
  delete-customer <id>                       delete a customer
  set-balance <id> <amount>                  set a customer's balance
  export                                     print the store as JSON
  back | help | quit";

/// Runs one admin command.
pub fn execute(state: &mut AppState, verb: &str, args: &str) -> CommandResult {
    match verb {
        "cuisines" => Ok(list_cuisines(state)),
        "add-cuisine" => add_cuisine(state, args),
        "delete-cuisine" => delete_cuisine(state, args),
        "dishes" => Ok(list_dishes(state)),
        "add-dish" => add_dish(state, args),
        "delete-dish" => delete_dish(state, args),
        "customers" => Ok(list_customers(state)),
        "add-customer" => add_customer(state, args),
        "delete-customer" => delete_customer(state, args),
        "set-balance" => set_balance(state, args),
        "export" => export(state),
        _ => Err(ApiError::unknown_command(verb)),
    }
}

/// Reply for a delete whose target is already gone.
fn nothing_to_delete(entity: &str, id: &str) -> Reply {
    Reply::message(format!("Nothing to delete: no {} with id {}", entity, id))
}

/// Splits form fields, rejecting more than `max` of them.
fn form_fields<'a>(args: &'a str, max: usize, usage: &str) -> Result<Vec<&'a str>, ApiError> {
    let fields = split_fields(args);
    if fields.len() > max {
        return Err(ApiError::validation(format!("Usage: {}", usage)));
    }
    Ok(fields)
}

// =============================================================================
// Cuisines
// =============================================================================

fn list_cuisines(state: &AppState) -> Reply {
    let cuisines = state.store.cuisines();
    if cuisines.is_empty() {
        return Reply::message("No cuisines yet.");
    }

    let lines: Vec<String> = cuisines
        .iter()
        .map(|c| {
            let dishes = state.store.dishes_for_cuisine(&c.id).len();
            format!("{}  {} ({} dishes)  {}", c.id, c.name, dishes, c.description)
        })
        .collect();
    Reply::message(lines.join("\n"))
}

fn add_cuisine(state: &mut AppState, args: &str) -> CommandResult {
    let fields = form_fields(args, 2, "add-cuisine <name>[; <description>]")?;
    let name = fields.first().copied().unwrap_or_default();
    validate_cuisine_name(name)?;
    let description = fields.get(1).copied().unwrap_or_default();

    let cuisine = state.store.add_cuisine(name, description);
    Ok(Reply::message(format!(
        "Added cuisine {} ({})",
        cuisine.name, cuisine.id
    )))
}

fn delete_cuisine(state: &mut AppState, args: &str) -> CommandResult {
    let id = required_arg(args, "delete-cuisine <id>")?;
    validate_id(id)?;

    let dish_count = state.store.dishes_for_cuisine(id).len();
    if !state.store.delete_cuisine(id) {
        return Ok(nothing_to_delete("cuisine", id));
    }
    Ok(Reply::message(format!(
        "Deleted cuisine {} and {} dish(es)",
        id, dish_count
    )))
}

// =============================================================================
// Dishes
// =============================================================================

fn list_dishes(state: &AppState) -> Reply {
    let dishes = state.store.dishes();
    if dishes.is_empty() {
        return Reply::message("No dishes yet.");
    }

    let lines: Vec<String> = dishes
        .iter()
        .map(|d| {
            let cuisine = state
                .store
                .cuisine(&d.cuisine_id)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            format!(
                "{}  {}  {}  [{}]",
                d.id,
                d.name,
                state.config.format_currency(d.price_cents),
                cuisine
            )
        })
        .collect();
    Reply::message(lines.join("\n"))
}

fn add_dish(state: &mut AppState, args: &str) -> CommandResult {
    const USAGE: &str =
        "add-dish <cuisine-id>; <name>; <price>[; <description>[; <image-url>]]";

    let fields = form_fields(args, 5, USAGE)?;
    if fields.len() < 3 {
        return Err(ApiError::validation(format!("Usage: {}", USAGE)));
    }
    let (cuisine_id, name, price) = (fields[0], fields[1], fields[2]);

    validate_id(cuisine_id)?;
    if state.store.cuisine(cuisine_id).is_none() {
        return Err(ApiError::not_found("Cuisine", cuisine_id));
    }
    validate_dish_name(name)?;
    let price = Money::parse_field("price", price)?;
    validate_price_cents(price.cents())?;

    let description = fields.get(3).copied().unwrap_or_default();
    let image_url = match fields.get(4).copied().filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => placeholder_image(&state.config.placeholder_image_base),
    };

    let dish = state.store.add_dish(NewDish {
        cuisine_id: cuisine_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_url,
    });
    Ok(Reply::message(format!(
        "Added dish {} ({}) {}",
        dish.name,
        state.config.format_currency(dish.price_cents),
        dish.id
    )))
}

/// A random picture from the placeholder service.
fn placeholder_image(base: &str) -> String {
    let n = Uuid::new_v4().as_u128() % 1000;
    format!("{}{}", base, n)
}

fn delete_dish(state: &mut AppState, args: &str) -> CommandResult {
    let id = required_arg(args, "delete-dish <id>")?;
    validate_id(id)?;

    if !state.store.delete_dish(id) {
        return Ok(nothing_to_delete("dish", id));
    }
    Ok(Reply::message(format!("Deleted dish {}", id)))
}

// =============================================================================
// Customers
// =============================================================================

fn list_customers(state: &AppState) -> Reply {
    let customers = state.store.customers();
    if customers.is_empty() {
        return Reply::message("No customers yet.");
    }

    let signed_in = state.store.current_user().map(|c| c.id.as_str());
    let lines: Vec<String> = customers
        .iter()
        .map(|c| {
            let mut line = format!(
                "{}  {}  {}  {}",
                c.id,
                c.name,
                c.role,
                state.config.format_currency(c.balance_cents)
            );
            if !c.standing().can_checkout() {
                line.push_str("  BLOCKED");
            }
            if signed_in == Some(c.id.as_str()) {
                line.push_str("  (signed in)");
            }
            line
        })
        .collect();
    Reply::message(lines.join("\n"))
}

fn add_customer(state: &mut AppState, args: &str) -> CommandResult {
    let fields = form_fields(args, 2, "add-customer <name>[; <role>]")?;
    let name = fields.first().copied().unwrap_or_default();
    validate_customer_name(name)?;

    let role = match fields.get(1).copied().filter(|r| !r.is_empty()) {
        Some(role) => role.parse::<CustomerRole>()?,
        None => CustomerRole::default(),
    };

    let customer = state.store.add_customer(name, role, Money::zero())?;
    Ok(Reply::message(format!(
        "Registered {} ({}) {}",
        customer.name, customer.role, customer.id
    )))
}

fn delete_customer(state: &mut AppState, args: &str) -> CommandResult {
    let id = required_arg(args, "delete-customer <id>")?;
    validate_id(id)?;

    let was_signed_in = state.store.current_user().map(|c| c.id == id).unwrap_or(false);
    if !state.store.delete_customer(id) {
        return Ok(nothing_to_delete("customer", id));
    }

    let mut message = format!("Deleted customer {}", id);
    if was_signed_in {
        message.push_str(" (their session has ended)");
    }
    Ok(Reply::message(message))
}

fn set_balance(state: &mut AppState, args: &str) -> CommandResult {
    const USAGE: &str = "set-balance <id> <amount>";

    let mut parts = args.split_whitespace();
    let (Some(id), Some(amount), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ApiError::validation(format!("Usage: {}", USAGE)));
    };
    validate_id(id)?;
    let balance = Money::parse(amount)?;

    let customer = state.store.update_customer_balance(id, balance)?;
    Ok(Reply::message(format!(
        "{} now has {}",
        customer.name,
        state.config.format_currency(customer.balance_cents)
    )))
}

fn export(state: &AppState) -> CommandResult {
    let snapshot = state.store.snapshot();
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| ApiError::internal(format!("Export failed: {}", e)))?;
    debug!(bytes = json.len(), "Exported store snapshot");
    Ok(Reply::Message(json))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;

    fn state() -> AppState {
        AppState::new(ConfigState::default())
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Message(m) => m,
            Reply::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn test_add_cuisine_requires_name() {
        let mut state = state();
        let err = execute(&mut state, "add-cuisine", " ; spicy").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.store.cuisines().len(), 3);

        let err = execute(&mut state, "add-cuisine", "Thai; Sweet; sour").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.store.cuisines().len(), 3);

        execute(&mut state, "add-cuisine", "Thai; Sweet and sour").unwrap();
        let thai = state.store.cuisines().last().unwrap();
        assert_eq!(thai.name, "Thai");
        assert_eq!(thai.description, "Sweet and sour");
    }

    #[test]
    fn test_delete_cuisine_reports_cascade() {
        let mut state = state();
        let reply = text(execute(&mut state, "delete-cuisine", "c1").unwrap());
        assert!(reply.contains("2 dish(es)"));
        assert!(state.store.dishes_for_cuisine("c1").is_empty());
    }

    #[test]
    fn test_deleting_absent_ids_is_not_an_error() {
        let mut state = state();
        execute(&mut state, "delete-cuisine", "c1").unwrap();

        for (verb, id) in [
            ("delete-cuisine", "c1"),
            ("delete-dish", "nope"),
            ("delete-customer", "u9"),
        ] {
            let reply = text(execute(&mut state, verb, id).unwrap());
            assert!(reply.starts_with("Nothing to delete"), "{}: {}", verb, reply);
        }
        assert_eq!(state.store.dishes().len(), 2);
        assert_eq!(state.store.customers().len(), 3);
    }

    #[test]
    fn test_add_dish_form_checks() {
        let mut state = state();

        let err = execute(&mut state, "add-dish", "c1; Tofu").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = execute(&mut state, "add-dish", "nope; Tofu; 3.50").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = execute(&mut state, "add-dish", "c1; Tofu; cheap").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = execute(&mut state, "add-dish", "c1; Tofu; -1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = execute(&mut state, "add-dish", "c1; Gold; 90000000000000000").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = execute(&mut state, "add-dish", "c1; Tofu; 3; Soft; http://x/t.png; extra")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(state.store.dishes().len(), 4);
    }

    #[test]
    fn test_add_dish_with_placeholder_image() {
        let mut state = state();
        execute(&mut state, "add-dish", "c2; Char Siu; 14.50; Roast pork").unwrap();

        let dish = state.store.dishes().last().unwrap();
        assert_eq!(dish.price_cents, 1450);
        assert_eq!(dish.cuisine_id, "c2");
        assert!(dish.image_url.starts_with(&state.config.placeholder_image_base));
    }

    #[test]
    fn test_add_dish_with_image_url() {
        let mut state = state();
        execute(
            &mut state,
            "add-dish",
            "c3; Fries; 3; Salted; https://example.com/fries.png",
        )
        .unwrap();
        let dish = state.store.dishes().last().unwrap();
        assert_eq!(dish.image_url, "https://example.com/fries.png");
    }

    #[test]
    fn test_add_customer_duplicate_and_role() {
        let mut state = state();

        let err = execute(&mut state, "add-customer", " bob ").unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateName);

        execute(&mut state, "add-customer", "Alice; vip").unwrap();
        let alice = state.store.customers().last().unwrap();
        assert_eq!(alice.role, CustomerRole::Vip);
        assert_eq!(alice.balance_cents, 0);

        let err = execute(&mut state, "add-customer", "Zed; emperor").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = execute(&mut state, "add-customer", "Zed; vip; 100").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.store.customers().len(), 4);
    }

    #[test]
    fn test_set_balance() {
        let mut state = state();
        let reply = text(execute(&mut state, "set-balance", "u3 20").unwrap());
        assert_eq!(reply, "Karen now has $20.00");
        assert_eq!(state.store.customer("u3").unwrap().balance_cents, 2000);

        let err = execute(&mut state, "set-balance", "u9 20").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = execute(&mut state, "set-balance", "u3").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_list_customers_marks_blocked() {
        let state = state();
        let listing = text(list_customers(&state));
        let karen = listing.lines().find(|l| l.contains("Karen")).unwrap();
        assert!(karen.contains("-$15.00"));
        assert!(karen.contains("BLOCKED"));
    }

    #[test]
    fn test_export_is_json() {
        let mut state = state();
        let json = text(execute(&mut state, "export", "").unwrap());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["customers"].as_array().unwrap().len(), 3);
        assert!(value["currentUserId"].is_null());
    }

    #[test]
    fn test_unknown_admin_command() {
        let mut state = state();
        let err = execute(&mut state, "checkout", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }
}
