//! # Cart
//!
//! The client's ephemeral order: a mapping from dish id to a positive
//! quantity. Prices are NOT frozen here; totals are computed from the live
//! dish list each time, so a dish deleted by the admin simply stops counting.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client Action            Cart Method              Line Change          │
//! │  ─────────────            ───────────              ───────────          │
//! │                                                                         │
//! │  Tap "+" on a dish ──────► add_item(id, 1) ──────► qty + 1 (or new)    │
//! │  Tap "-" on a dish ──────► remove_one(id) ───────► qty - 1 (0 drops)   │
//! │  Set quantity ───────────► update_quantity() ────► qty = n (0 drops)   │
//! │  Checkout OK / logout ───► clear() ──────────────► empty               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Dish;
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// One dish in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub dish_id: String,
    /// Always at least 1.
    pub quantity: i64,
}

/// A cart line resolved against the current dish list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine<'a> {
    pub dish: &'a Dish,
    pub quantity: i64,
}

impl PricedLine<'_> {
    /// Unit price × quantity.
    pub fn line_total(&self) -> CoreResult<Money> {
        self.dish
            .price()
            .multiply_quantity(self.quantity)
            .ok_or(CoreError::TotalOutOfRange)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `dish_id` and keep insertion order
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
/// - A rejected operation leaves the cart unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds `quantity` of a dish, merging with an existing line.
    pub fn add_item(&mut self, dish_id: &str, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.dish_id == dish_id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        validate_cart_size(self.lines.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        self.lines.push(CartLine {
            dish_id: dish_id.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Takes one unit of a dish out. Dropping to zero removes the line;
    /// an absent dish is a no-op. Returns the remaining quantity.
    pub fn remove_one(&mut self, dish_id: &str) -> i64 {
        let Some(pos) = self.lines.iter().position(|l| l.dish_id == dish_id) else {
            return 0;
        };

        self.lines[pos].quantity -= 1;
        let remaining = self.lines[pos].quantity;
        if remaining <= 0 {
            self.lines.remove(pos);
            return 0;
        }
        remaining
    }

    /// Sets the quantity of a line already in the cart; 0 removes it.
    pub fn update_quantity(&mut self, dish_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(dish_id);
        }
        validate_quantity(quantity)?;

        match self.lines.iter_mut().find(|l| l.dish_id == dish_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::DishNotInCart(dish_id.to_string())),
        }
    }

    /// Removes a whole line.
    pub fn remove_item(&mut self, dish_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.dish_id != dish_id);

        if self.lines.len() == initial_len {
            Err(CoreError::DishNotInCart(dish_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Quantity of one dish (0 if absent).
    pub fn quantity_of(&self, dish_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.dish_id == dish_id)
            .map_or(0, |l| l.quantity)
    }

    /// Total number of units across all lines (the cart badge).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct dishes.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines resolved against `dishes`; lines whose dish no longer exists
    /// are skipped.
    pub fn priced_lines<'a>(&self, dishes: &'a [Dish]) -> Vec<PricedLine<'a>> {
        self.lines
            .iter()
            .filter_map(|line| {
                dishes
                    .iter()
                    .find(|d| d.id == line.dish_id)
                    .map(|dish| PricedLine {
                        dish,
                        quantity: line.quantity,
                    })
            })
            .collect()
    }

    /// Σ price × quantity over lines whose dish still exists.
    ///
    /// ## Errors
    /// [`CoreError::TotalOutOfRange`] if a line or the sum overflows.
    pub fn total(&self, dishes: &[Dish]) -> CoreResult<Money> {
        self.priced_lines(dishes)
            .iter()
            .try_fold(Money::zero(), |acc, line| {
                acc.checked_add(line.line_total()?)
                    .ok_or(CoreError::TotalOutOfRange)
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str, price_cents: i64) -> Dish {
        Dish {
            id: id.to_string(),
            cuisine_id: "c1".to_string(),
            name: format!("Dish {}", id),
            description: String::new(),
            price_cents,
            image_url: String::new(),
        }
    }

    #[test]
    fn test_add_same_dish_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item("d1", 1).unwrap();
        cart.add_item("d1", 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("d1"), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_total_uses_live_prices() {
        let dishes = vec![dish("d1", 1299), dish("d2", 1550)];
        let mut cart = Cart::new();
        cart.add_item("d1", 1).unwrap();
        cart.add_item("d2", 1).unwrap();

        assert_eq!(cart.total(&dishes).unwrap().cents(), 2849);
    }

    #[test]
    fn test_total_skips_deleted_dishes() {
        let dishes = vec![dish("d1", 1299)];
        let mut cart = Cart::new();
        cart.add_item("d1", 2).unwrap();
        cart.add_item("gone", 5).unwrap();

        assert_eq!(cart.total(&dishes).unwrap().cents(), 2598);
        assert_eq!(cart.priced_lines(&dishes).len(), 1);
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let dishes = vec![dish("gold", i64::MAX / 2 + 1), dish("d1", 1299)];
        let mut cart = Cart::new();
        cart.add_item("gold", 1).unwrap();
        assert_eq!(cart.total(&dishes).unwrap().cents(), i64::MAX / 2 + 1);

        cart.add_item("gold", 1).unwrap();
        assert!(matches!(cart.total(&dishes), Err(CoreError::TotalOutOfRange)));

        let mut cart = Cart::new();
        cart.add_item("gold", 1).unwrap();
        cart.add_item("d1", 1).unwrap();
        let dishes = vec![dish("gold", i64::MAX - 1000), dish("d1", 1299)];
        assert!(matches!(cart.total(&dishes), Err(CoreError::TotalOutOfRange)));
    }

    #[test]
    fn test_remove_one_drops_line_at_zero() {
        let mut cart = Cart::new();
        cart.add_item("d1", 2).unwrap();

        assert_eq!(cart.remove_one("d1"), 1);
        assert_eq!(cart.remove_one("d1"), 0);
        assert!(cart.is_empty());

        // Absent dish is a no-op.
        assert_eq!(cart.remove_one("d1"), 0);
    }

    #[test]
    fn test_rejected_add_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item("d1", 998).unwrap();

        assert!(matches!(
            cart.add_item("d1", 2),
            Err(CoreError::QuantityTooLarge { requested: 1000, .. })
        ));
        assert!(cart.add_item("d2", 0).is_err());
        assert_eq!(cart.quantity_of("d1"), 998);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_cart_size_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&format!("d{}", i), 1).unwrap();
        }
        assert!(matches!(
            cart.add_item("one-more", 1),
            Err(CoreError::CartTooLarge { .. })
        ));
        // Existing lines can still grow.
        cart.add_item("d0", 1).unwrap();
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item("d1", 1).unwrap();

        cart.update_quantity("d1", 4).unwrap();
        assert_eq!(cart.quantity_of("d1"), 4);

        cart.update_quantity("d1", 0).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.update_quantity("d1", 2),
            Err(CoreError::DishNotInCart(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item("d1", 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
