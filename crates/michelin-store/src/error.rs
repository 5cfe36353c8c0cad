//! # Store Error Types
//!
//! Errors returned by [`Store`](crate::Store) operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Error Types                                    │
//! │                                                                         │
//! │  Registration                                                          │
//! │  └── DuplicateName      - Customer name already taken                  │
//! │                                                                         │
//! │  Lookup                                                                │
//! │  ├── NotFound           - Login name / customer id unknown             │
//! │  └── NotSignedIn        - Checkout without a session                   │
//! │                                                                         │
//! │  Domain                                                                │
//! │  └── Core               - InsufficientFunds, cart limits, validation   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed operation never leaves a partial change behind.

use michelin_core::CoreError;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another customer already has this name (ignoring case and
    /// surrounding whitespace).
    #[error("Customer name must be unique: '{name}' already exists")]
    DuplicateName { name: String },

    /// Record not found.
    ///
    /// ## When This Occurs
    /// - Login with a name nobody registered
    /// - Balance override for a deleted customer
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Checkout attempted with nobody signed in.
    #[error("No customer is signed in")]
    NotSignedIn,

    /// Domain rule violation (e.g. checkout while blocked).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a DuplicateName error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        StoreError::DuplicateName { name: name.into() }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use michelin_core::Money;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::duplicate("Bob").to_string(),
            "Customer name must be unique: 'Bob' already exists"
        );
        assert_eq!(
            StoreError::not_found("Customer", "zed").to_string(),
            "Customer not found: zed"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: StoreError = CoreError::InsufficientFunds {
            balance: Money::from_cents(-1500),
        }
        .into();
        assert_eq!(err.to_string(), "Insufficient funds: balance is -$15.00");
    }
}
