//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command line ──► commands::* ──► Result<Reply, ApiError>              │
//! │                        │                                                │
//! │                        ├── ValidationError (form)  ──┐                 │
//! │                        ├── CoreError (cart, funds) ──┼──► ApiError     │
//! │                        └── StoreError (store)      ──┘     code+message│
//! │                                                                         │
//! │  The shell prints `message`; `code` is for programmatic callers.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use michelin_core::{CoreError, ValidationError};
use michelin_store::StoreError;

/// Error returned from a console command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "DUPLICATE_NAME",
///   "message": "Customer name must be unique: 'Bob' already exists"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Form input failed validation
    ValidationError,

    /// Customer name already registered
    DuplicateName,

    /// Checkout while the account is blocked
    InsufficientFunds,

    /// Client action without a signed-in customer
    NotSignedIn,

    /// Cart operation failed
    CartError,

    /// Command not recognised in the current view
    UnknownCommand,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates an unknown-command error with a hint.
    pub fn unknown_command(verb: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command '{}'. Type 'help' for the commands here.", verb),
        )
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientFunds { balance } => ApiError::new(
                ErrorCode::InsufficientFunds,
                format!(
                    "Checkout failed: your balance is negative ({}). Please recharge at the counter.",
                    balance
                ),
            ),
            CoreError::DishNotInCart(id) => {
                ApiError::new(ErrorCode::CartError, format!("Dish {} is not in your cart", id))
            }
            CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::TotalOutOfRange => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName { .. } => {
                ApiError::new(ErrorCode::DuplicateName, err.to_string())
            }
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::NotSignedIn => {
                ApiError::new(ErrorCode::NotSignedIn, "Please log in first")
            }
            StoreError::Core(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
