//! # Checkout Policy
//!
//! The house account lets a customer overdraw exactly once.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Account Standing                                     │
//! │                                                                         │
//! │            checkout(T)                                                  │
//! │   ┌──────────┐  balance - T >= 0   ┌──────────┐                        │
//! │   │ Eligible │────────────────────►│ Eligible │                        │
//! │   │ bal >= 0 │                     └──────────┘                        │
//! │   └────┬─────┘                                                          │
//! │        │ balance - T < 0  (the one overdraft)                          │
//! │        ▼                                                                │
//! │   ┌──────────┐  checkout(T) ──► InsufficientFunds, nothing changes     │
//! │   │ Blocked  │                                                          │
//! │   │ bal < 0  │  only an admin balance override leads back out          │
//! │   └──────────┘                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Whether an account may place an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStanding {
    /// Balance is zero or positive.
    Eligible,
    /// Balance is negative.
    Blocked,
}

impl AccountStanding {
    /// Standing for a given balance.
    pub fn of(balance: Money) -> Self {
        if balance.is_negative() {
            AccountStanding::Blocked
        } else {
            AccountStanding::Eligible
        }
    }

    pub fn can_checkout(&self) -> bool {
        matches!(self, AccountStanding::Eligible)
    }
}

/// Applies an order total to a balance and returns the new balance.
///
/// ## Rules
/// - `Blocked` (balance < 0): [`CoreError::InsufficientFunds`]
/// - `Eligible`: always succeeds, even when the result is negative
/// - A negative total is rejected as invalid input
///
/// ```rust
/// use michelin_core::checkout::settle;
/// use michelin_core::money::Money;
///
/// let after = settle(Money::from_cents(5000), Money::from_cents(2849)).unwrap();
/// assert_eq!(after.cents(), 2151);
/// ```
pub fn settle(balance: Money, total: Money) -> CoreResult<Money> {
    if total.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "order total".to_string(),
            min: 0,
            max: i64::MAX,
        }
        .into());
    }

    match AccountStanding::of(balance) {
        AccountStanding::Blocked => Err(CoreError::InsufficientFunds { balance }),
        AccountStanding::Eligible => balance
            .checked_sub(total)
            .ok_or(CoreError::TotalOutOfRange),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
