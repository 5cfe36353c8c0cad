//! # Validation Module
//!
//! Form-level input checks for the admin and client surfaces.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Surface (console commands)                                   │
//! │  ├── Required fields, lengths, parseable numbers                       │
//! │  └── THIS MODULE                                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store                                                        │
//! │  ├── Customer name uniqueness                                          │
//! │  ├── Cascade delete                                                    │
//! │  └── Checkout standing                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The Store deliberately accepts an empty cuisine or dish name; rejecting
//! them is the form's job.
//!
//! ## Usage
//! ```rust
//! use michelin_core::validation::{validate_customer_name, validate_quantity};
//!
//! validate_customer_name("Bob").unwrap();
//! validate_quantity(2).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest cuisine, dish or customer name accepted from a form.
pub const MAX_NAME_LEN: usize = 80;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a cuisine name: required, at most [`MAX_NAME_LEN`] characters.
pub fn validate_cuisine_name(name: &str) -> ValidationResult<()> {
    validate_name("cuisine name", name)
}

/// Validates a dish name: required, at most [`MAX_NAME_LEN`] characters.
pub fn validate_dish_name(name: &str) -> ValidationResult<()> {
    validate_name("dish name", name)
}

/// Validates a customer name: required, at most [`MAX_NAME_LEN`] characters.
///
/// ```rust
/// use michelin_core::validation::validate_customer_name;
///
/// assert!(validate_customer_name("Karen").is_ok());
/// assert!(validate_customer_name("   ").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_name("customer name", name)
}

/// Validates a record id typed into a form.
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity: `1..=MAX_ITEM_QUANTITY`.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a dish price in cents: `0..=MAX_PRICE_CENTS`. Zero is
/// allowed (free items).
///
/// ```rust
/// use michelin_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1299).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(9_000_000_000_000_000).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct dish fits in the cart.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_names() {
        assert!(validate_cuisine_name("Sichuan").is_ok());
        assert!(validate_dish_name("Mapo Tofu").is_ok());
        assert!(validate_customer_name(" Bob ").is_ok());

        assert!(validate_cuisine_name("").is_err());
        assert!(validate_dish_name("  ").is_err());
        assert!(matches!(
            validate_customer_name(&"A".repeat(MAX_NAME_LEN + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(2200).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(matches!(
            validate_price_cents(MAX_PRICE_CENTS + 1),
            Err(ValidationError::OutOfRange { max: MAX_PRICE_CENTS, .. })
        ));
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("c1").is_ok());
        assert!(validate_id(" ").is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }
}
