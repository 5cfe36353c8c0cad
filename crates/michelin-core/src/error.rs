//! # Error Types
//!
//! Domain-specific error types for michelin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  michelin-core errors (this file)                                      │
//! │  ├── CoreError        - Cart and checkout rule violations              │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  michelin-store errors                                                 │
//! │  └── StoreError       - Duplicate names, missing records, no session   │
//! │                                                                         │
//! │  console errors                                                        │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → User      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is recoverable: the operation that produced it made no change.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout attempted while the account is blocked.
    ///
    /// ## User Workflow
    /// ```text
    /// Balance: -$15.00 (Blocked)
    ///      │
    ///      ▼
    /// checkout ──► InsufficientFunds { balance: -$15.00 }
    ///      │
    ///      ▼
    /// UI shows: "Please recharge at the counter" (cart kept)
    /// ```
    #[error("Insufficient funds: balance is {balance}")]
    InsufficientFunds { balance: Money },

    /// Dish id is not a line in the cart.
    #[error("Dish {0} is not in the cart")]
    DishNotInCart(String),

    /// Cart has exceeded the maximum number of distinct dishes.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A line total or order total does not fit in i64 cents.
    #[error("Order total is out of range")]
    TotalOutOfRange,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the form layer before any store operation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. "12.999" for a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
