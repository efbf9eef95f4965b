//! Commerce error types.

use thiserror::Error;

use crate::reviews::ValidationError;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Not enough stock to satisfy the request.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Review form event not allowed in the current phase.
    #[error("Invalid review form transition: {event} while {from}")]
    InvalidFormTransition {
        from: &'static str,
        event: &'static str,
    },

    /// Review submission rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
