//! Quote error types.

use thiserror::Error;

/// Errors raised by form validation before a surface reaches the estimator.
///
/// Distinct from "not yet computable", which is a missing value and is
/// reported as `Ok(None)` by the form types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A dimension was zero, negative, NaN or infinite.
    #[error("{field} must be a positive number, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },

    /// A count was negative.
    #[error("{field} cannot be negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    /// A count does not fit the supported range.
    #[error("{field} is too large: {value}")]
    CountTooLarge { field: &'static str, value: i64 },

    /// A unit count of zero for a per-unit service.
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    /// Room height below the minimum ceiling height.
    #[error("height {value} ft is below the minimum ceiling height of {min} ft")]
    CeilingTooLow { value: f64, min: f64 },
}

/// Errors that can occur in quoting operations.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The request has no computable breakdown yet.
    #[error("Estimate not computable for {0}: missing or zero measurement")]
    NotComputable(String),

    /// The surfaces supplied do not fit the chosen service.
    #[error("Service {service} cannot be priced from {found}")]
    UnitMismatch { service: String, found: String },

    /// Combining unit counts overflowed.
    #[error("Arithmetic overflow combining unit counts")]
    Overflow,

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// A rate in the rate table is zero, negative or not a number.
    #[error("Invalid rate {name}: {value} (rates must be positive)")]
    InvalidRate { name: String, value: f64 },

    /// A policy value is out of range.
    #[error("Invalid policy {name}: {value}")]
    InvalidPolicy { name: String, value: f64 },

    /// Invalid request status transition.
    #[error("Invalid request transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Checkout was attempted on an ineligible cart.
    #[error("Checkout not allowed: {0}")]
    CheckoutBlocked(String),

    /// The submission collaborator rejected the request.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Form validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Cache error.
    #[cfg(feature = "storage")]
    #[error("Cache error: {0}")]
    Cache(String),
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for QuoteError {
    fn from(e: toml::de::Error) -> Self {
        QuoteError::Config(e.to_string())
    }
}

#[cfg(feature = "storage")]
impl From<paint_cache::CacheError> for QuoteError {
    fn from(e: paint_cache::CacheError) -> Self {
        QuoteError::Cache(e.to_string())
    }
}
