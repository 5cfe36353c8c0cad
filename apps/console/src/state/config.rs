//! # Configuration State
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MICHELIN_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup.

use serde::{Deserialize, Serialize};

use michelin_store::seed::PLACEHOLDER_IMAGE_BASE;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown on the landing view.
    pub restaurant_name: String,

    pub tagline: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Start the session with the demo menu and customers.
    pub seed_demo_data: bool,

    /// Prefix for placeholder pictures of dishes added without an image URL.
    pub placeholder_image_base: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            restaurant_name: "Michelin".to_string(),
            tagline: "Next Gen Restaurant Experience".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            seed_demo_data: true,
            placeholder_image_base: PLACEHOLDER_IMAGE_BASE.to_string(),
        }
    }
}

/// `0`, `false`, `no`, `off` (any case) are false; anything else is true.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MICHELIN_RESTAURANT_NAME`: Override the landing title
    /// - `MICHELIN_CURRENCY_SYMBOL`: Override the currency symbol
    /// - `MICHELIN_SEED_DEMO`: `0`/`false` starts with an empty store
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("MICHELIN_RESTAURANT_NAME") {
            config.restaurant_name = name;
        }

        if let Some(symbol) = lookup("MICHELIN_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(flag) = lookup("MICHELIN_SEED_DEMO") {
            config.seed_demo_data = parse_flag(&flag);
        }

        config
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use michelin_console::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(2151), "$21.51");
    /// assert_eq!(config.format_currency(-1500), "-$15.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1299), "$12.99");
        assert_eq!(config.format_currency(100_000), "$1000.00");
        assert_eq!(config.format_currency(5), "$0.05");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1500), "-$15.00");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MICHELIN_RESTAURANT_NAME", "Chez Rust"),
            ("MICHELIN_CURRENCY_SYMBOL", "€"),
            ("MICHELIN_SEED_DEMO", "off"),
        ]
        .into_iter()
        .collect();

        let config = ConfigState::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.restaurant_name, "Chez Rust");
        assert_eq!(config.format_currency(850), "€8.50");
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ConfigState::from_lookup(|_| None);
        assert_eq!(config.restaurant_name, "Michelin");
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" 0 "));
    }
}
