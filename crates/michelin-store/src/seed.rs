//! # Seed Data
//!
//! The demo menu and customers a fresh session starts with.
//!
//! ## Demo Data
//! - 3 cuisines: Sichuan, Cantonese, Fast Food
//! - 4 dishes priced $8.99 - $22.00
//! - 3 customers covering each standing:
//!   Elon ($1000.00), Bob ($50.00), Karen (-$15.00, blocked)

use michelin_core::{Cuisine, Customer, CustomerRole, Dish};

/// Placeholder picture service used for seeded dishes.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/200/200?random=";

/// Initial record lists for a [`Store`](crate::Store).
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub cuisines: Vec<Cuisine>,
    pub dishes: Vec<Dish>,
    pub customers: Vec<Customer>,
}

/// (id, name, description)
const CUISINES: &[(&str, &str, &str)] = &[
    ("c1", "Sichuan", "Spicy and numbing flavors"),
    ("c2", "Cantonese", "Fresh and delicate taste"),
    ("c3", "Fast Food", "Quick bites and burgers"),
];

/// (id, cuisine id, name, description, price in cents)
const DISHES: &[(&str, &str, &str, &str, i64)] = &[
    ("d1", "c1", "Mapo Tofu", "Tofu set in a spicy sauce with minced meat", 1299),
    ("d2", "c1", "Kung Pao Chicken", "Spicy stir-fry with chicken, peanuts, and vegetables", 1550),
    ("d3", "c2", "Dim Sum Platter", "Assortment of steamed buns and dumplings", 2200),
    ("d4", "c3", "Cheeseburger", "Classic beef burger with cheddar", 899),
];

/// (id, name, role, balance in cents)
const CUSTOMERS: &[(&str, &str, CustomerRole, i64)] = &[
    ("u1", "Elon", CustomerRole::SuperVip, 100_000),
    ("u2", "Bob", CustomerRole::Regular, 5_000),
    ("u3", "Karen", CustomerRole::Annoying, -1_500),
];

impl SeedData {
    /// No records at all.
    pub fn empty() -> Self {
        SeedData::default()
    }

    /// The demo restaurant.
    pub fn demo() -> Self {
        let cuisines = CUISINES
            .iter()
            .map(|(id, name, description)| Cuisine {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect();

        let dishes = DISHES
            .iter()
            .enumerate()
            .map(|(i, (id, cuisine_id, name, description, price_cents))| Dish {
                id: id.to_string(),
                cuisine_id: cuisine_id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price_cents: *price_cents,
                image_url: format!("{}{}", PLACEHOLDER_IMAGE_BASE, i + 1),
            })
            .collect();

        let customers = CUSTOMERS
            .iter()
            .map(|(id, name, role, balance_cents)| Customer {
                id: id.to_string(),
                name: name.to_string(),
                role: *role,
                balance_cents: *balance_cents,
            })
            .collect();

        SeedData {
            cuisines,
            dishes,
            customers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use michelin_core::types::name_key;
    use std::collections::HashSet;

    #[test]
    fn test_demo_dishes_reference_existing_cuisines() {
        let seed = SeedData::demo();
        for dish in &seed.dishes {
            assert!(
                seed.cuisines.iter().any(|c| c.id == dish.cuisine_id),
                "{} points at a missing cuisine",
                dish.name
            );
        }
    }

    #[test]
    fn test_demo_customer_names_unique() {
        let seed = SeedData::demo();
        let keys: HashSet<_> = seed.customers.iter().map(|c| name_key(&c.name)).collect();
        assert_eq!(keys.len(), seed.customers.len());
    }

    #[test]
    fn test_demo_counts() {
        let seed = SeedData::demo();
        assert_eq!(seed.cuisines.len(), 3);
        assert_eq!(seed.dishes.len(), 4);
        assert_eq!(seed.customers.len(), 3);
        assert!(SeedData::empty().dishes.is_empty());
    }
}
