//! # Money Module
//!
//! Provides the `Money` type used for dish prices and customer balances.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    50.00 - (12.99 + 15.50) = 21.509999999999998  ❌                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    5000 - (1299 + 1550) = 2151 cents = $21.51  ✅                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form input arrives as text; [`Money::parse`] turns it into cents without
//! ever going through a float.
//!
//! ## Usage
//! ```rust
//! use michelin_core::money::Money;
//!
//! let price = Money::parse("12.99").unwrap();
//! let total = price + Money::from_cents(1550);
//! assert_eq!(total.cents(), 2849);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative after an overdraft
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Dish.price_cents ──► Cart.total ──► settle(balance, total) ──► new balance
///                                                 │
/// Admin "set balance" form ── Money::parse ───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use michelin_core::money::Money;
    ///
    /// let price = Money::from_cents(1299); // $12.99
    /// assert_eq!(price.cents(), 1299);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents, or `None` if it does
    /// not fit in i64 cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-15, 50)` is -$15.50.
    ///
    /// ```rust
    /// use michelin_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(15, 50).unwrap().cents(), 1550);
    /// assert_eq!(Money::from_major_minor(-15, 50).unwrap().cents(), -1550);
    /// assert!(Money::from_major_minor(i64::MAX, 0).is_none());
    /// ```
    pub const fn from_major_minor(major: i64, minor: i64) -> Option<Self> {
        let Some(scaled) = major.checked_mul(100) else {
            return None;
        };
        let cents = if major < 0 {
            scaled.checked_sub(minor)
        } else {
            scaled.checked_add(minor)
        };
        match cents {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a user-typed amount such as `"12.99"`, `"-15"` or `"$8.5"`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - An optional leading `-`, then an optional `$`
    /// - At most two fractional digits (`"1.999"` is rejected, not rounded)
    ///
    /// ```rust
    /// use michelin_core::money::Money;
    ///
    /// assert_eq!(Money::parse("12.99").unwrap().cents(), 1299);
    /// assert_eq!(Money::parse(" -15 ").unwrap().cents(), -1500);
    /// assert_eq!(Money::parse("$8.5").unwrap().cents(), 850);
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        Money::parse_field("amount", input)
    }

    /// Same as [`Money::parse`], naming `field` in any error.
    pub fn parse_field(field: &str, input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let text = text.strip_prefix('$').unwrap_or(text);

        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must be a number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a number"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most 2 decimal places"));
        }

        let too_large = || ValidationError::OutOfRange {
            field: field.to_string(),
            min: i64::MIN / 100,
            max: i64::MAX / 100,
        };

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("must be a number"))? * 10,
            _ => frac.parse().map_err(|_| invalid("must be a number"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a quantity, or `None` on overflow.
    ///
    /// ```rust
    /// use michelin_core::money::Money;
    ///
    /// let line = Money::from_cents(1299).multiply_quantity(2).unwrap();
    /// assert_eq!(line.cents(), 2598);
    /// assert!(Money::from_cents(i64::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Addition that returns `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtraction that returns `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows `$12.99` / `-$15.00`. The console formats with its configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// The operators follow plain i64 overflow rules. Totals built from user
// input go through the checked forms above.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1299);
        assert_eq!(money.cents(), 1299);
        assert_eq!(money.dollars(), 12);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(2151)), "$21.51");
        assert_eq!(format!("{}", Money::from_cents(-1500)), "-$15.00");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-$0.05");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(2500);

        assert_eq!((a - b).cents(), -1500);
        assert_eq!((a + b).cents(), 3500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [1299, 1550].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 2849);
    }

    #[test]
    fn test_parse_accepts_form_input() {
        assert_eq!(Money::parse("12.99").unwrap().cents(), 1299);
        assert_eq!(Money::parse("15.5").unwrap().cents(), 1550);
        assert_eq!(Money::parse("1000").unwrap().cents(), 100_000);
        assert_eq!(Money::parse("-15").unwrap().cents(), -1500);
        assert_eq!(Money::parse("-$0.75").unwrap().cents(), -75);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("7.").unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("1.999"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("-").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1e5").is_err());
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_field_names_field() {
        let err = Money::parse_field("price", "").unwrap_err();
        assert_eq!(err.to_string(), "price is required");
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::from_cents(-550).abs().cents(), 550);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(Money::from_cents(899).multiply_quantity(3), Some(Money::from_cents(2697)));
        assert_eq!(max.multiply_quantity(2), None);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(5000).checked_sub(Money::from_cents(6600)),
            Some(Money::from_cents(-1600))
        );
    }

    #[test]
    fn test_from_major_minor_checked() {
        assert_eq!(Money::from_major_minor(12, 99), Some(Money::from_cents(1299)));
        assert_eq!(Money::from_major_minor(-15, 0), Some(Money::from_cents(-1500)));
        assert_eq!(Money::from_major_minor(i64::MAX / 100, 99), None);
        assert_eq!(Money::from_major_minor(i64::MIN, 0), None);
    }

    /// The checkout scenario from the ordering flow, done in cents.
    #[test]
    fn test_no_float_drift_in_checkout_math() {
        let balance = Money::from_cents(5000);
        let total = Money::from_cents(1299) + Money::from_cents(1550);
        assert_eq!((balance - total).to_string(), "$21.51");
    }
}
