//! Billing error types

use thiserror::Error;

/// Billing-specific errors
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
}

pub type BillingResult<T> = Result<T, BillingError>;
