//! # Domain Types
//!
//! The records the restaurant works with.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Cuisine      │◄──│      Dish       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  cuisine_id(FK) │   │  name (unique)  │       │
//! │  │  description    │   │  name           │   │  role           │       │
//! │  └─────────────────┘   │  price_cents    │   │  balance_cents  │       │
//! │                        │  image_url      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  CustomerRole   │   │ CheckoutReceipt │                              │
//! │  │  SuperVip, Vip  │   │  lines (frozen) │                              │
//! │  │  Regular        │   │  total          │                              │
//! │  │  Annoying       │   │  old/new balance│                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a cuisine deletes its dishes (see `michelin-store`), so a dish's
//! `cuisine_id` only dangles if the dish was added with an unknown id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::checkout::AccountStanding;
use crate::error::ValidationError;
use crate::money::Money;

/// Normalized lookup key for customer names: trimmed and lowercased.
///
/// ```rust
/// use michelin_core::types::name_key;
///
/// assert_eq!(name_key("  Bob "), name_key("bob"));
/// ```
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Cuisine
// =============================================================================

/// A menu section, e.g. "Sichuan".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cuisine {
    pub id: String,
    pub name: String,
    pub description: String,
}

// =============================================================================
// Dish
// =============================================================================

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dish {
    /// Unique identifier.
    pub id: String,

    /// Cuisine this dish is listed under.
    pub cuisine_id: String,

    /// Display name on the menu.
    pub name: String,

    pub description: String,

    /// Price in cents. Never negative.
    pub price_cents: i64,

    /// Picture shown on the menu card.
    pub image_url: String,
}

impl Dish {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Customer Role
// =============================================================================

/// How the house regards a customer. Purely descriptive; no rule depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CustomerRole {
    #[serde(rename = "Super VIP")]
    SuperVip,
    #[serde(rename = "VIP")]
    Vip,
    #[default]
    Regular,
    Annoying,
}

impl CustomerRole {
    /// All roles, in the order the admin form lists them.
    pub const ALL: [CustomerRole; 4] = [
        CustomerRole::SuperVip,
        CustomerRole::Vip,
        CustomerRole::Regular,
        CustomerRole::Annoying,
    ];

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            CustomerRole::SuperVip => "Super VIP",
            CustomerRole::Vip => "VIP",
            CustomerRole::Regular => "Regular",
            CustomerRole::Annoying => "Annoying",
        }
    }
}

impl fmt::Display for CustomerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the label ("Super VIP") or a compact spelling ("super-vip",
/// "super_vip", "supervip"), case-insensitively.
impl FromStr for CustomerRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match compact.as_str() {
            "supervip" => Ok(CustomerRole::SuperVip),
            "vip" => Ok(CustomerRole::Vip),
            "regular" => Ok(CustomerRole::Regular),
            "annoying" => Ok(CustomerRole::Annoying),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: CustomerRole::ALL
                    .iter()
                    .map(|r| r.label().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer with a house account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,

    /// Unique under [`name_key`]. Stored trimmed.
    pub name: String,

    pub role: CustomerRole,

    /// House account balance in cents. Negative after an overdraft.
    pub balance_cents: i64,
}

impl Customer {
    /// Returns the balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_cents(self.balance_cents)
    }

    /// Whether this customer may check out right now.
    #[inline]
    pub fn standing(&self) -> AccountStanding {
        AccountStanding::of(self.balance())
    }

    /// Case- and whitespace-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}

// =============================================================================
// Checkout Receipt
// =============================================================================

/// One dish on a receipt, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptLine {
    pub dish_id: String,
    /// Dish name at checkout (frozen).
    pub name: String,
    /// Unit price in cents at checkout (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

/// The outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutReceipt {
    pub customer_id: String,
    pub customer_name: String,
    pub lines: Vec<ReceiptLine>,
    pub total_cents: i64,
    pub previous_balance_cents: i64,
    pub new_balance_cents: i64,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl CheckoutReceipt {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the balance after the order as Money.
    #[inline]
    pub fn new_balance(&self) -> Money {
        Money::from_cents(self.new_balance_cents)
    }

    /// True when this order used the one-time overdraft.
    pub fn overdrawn(&self) -> bool {
        self.new_balance_cents < 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, balance_cents: i64) -> Customer {
        Customer {
            id: "u1".to_string(),
            name: name.to_string(),
            role: CustomerRole::Regular,
            balance_cents,
        }
    }

    #[test]
    fn test_name_key_ignores_case_and_whitespace() {
        assert_eq!(name_key(" Bob "), "bob");
        assert_eq!(name_key("KAREN"), name_key("karen\t"));
        assert_ne!(name_key("Bo b"), name_key("Bob"));
    }

    #[test]
    fn test_customer_matches_name() {
        let bob = customer("Bob", 5000);
        assert!(bob.matches_name(" bob "));
        assert!(bob.matches_name("BOB"));
        assert!(!bob.matches_name("Bobby"));
    }

    #[test]
    fn test_customer_standing() {
        assert_eq!(customer("Bob", 0).standing(), AccountStanding::Eligible);
        assert_eq!(customer("Karen", -1500).standing(), AccountStanding::Blocked);
    }

    #[test]
    fn test_role_default_is_regular() {
        assert_eq!(CustomerRole::default(), CustomerRole::Regular);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Super VIP".parse::<CustomerRole>().unwrap(), CustomerRole::SuperVip);
        assert_eq!("super-vip".parse::<CustomerRole>().unwrap(), CustomerRole::SuperVip);
        assert_eq!("vip".parse::<CustomerRole>().unwrap(), CustomerRole::Vip);
        assert_eq!(" ANNOYING ".parse::<CustomerRole>().unwrap(), CustomerRole::Annoying);
        assert!(matches!(
            "royalty".parse::<CustomerRole>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_role_serializes_as_label() {
        let json = serde_json::to_string(&CustomerRole::SuperVip).unwrap();
        assert_eq!(json, "\"Super VIP\"");
        let role: CustomerRole = serde_json::from_str("\"Annoying\"").unwrap();
        assert_eq!(role, CustomerRole::Annoying);
    }

    #[test]
    fn test_dish_uses_camel_case_fields() {
        let dish = Dish {
            id: "d1".to_string(),
            cuisine_id: "c1".to_string(),
            name: "Mapo Tofu".to_string(),
            description: String::new(),
            price_cents: 1299,
            image_url: String::new(),
        };
        let value = serde_json::to_value(&dish).unwrap();
        assert_eq!(value["cuisineId"], "c1");
        assert_eq!(value["priceCents"], 1299);
        assert_eq!(dish.price().to_string(), "$12.99");
    }

    #[test]
    fn test_receipt_overdrawn() {
        let receipt = CheckoutReceipt {
            customer_id: "u1".to_string(),
            customer_name: "Bob".to_string(),
            lines: Vec::new(),
            total_cents: 2500,
            previous_balance_cents: 1000,
            new_balance_cents: -1500,
            placed_at: Utc::now(),
        };
        assert!(receipt.overdrawn());
        assert_eq!(receipt.total().cents(), 2500);
        assert_eq!(receipt.new_balance().cents(), -1500);
    }
}
