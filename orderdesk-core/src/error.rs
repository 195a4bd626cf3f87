//! Error taxonomy shared by the order builder, the formatter and the price-list client.

use thiserror::Error;

/// Input rejected before it reaches the order draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("quantity must be greater than zero (got {0})")]
    NonPositiveQuantity(String),
    #[error("unit price cannot be negative (got {0})")]
    NegativePrice(String),
    #[error("commission rate cannot be negative (got {0})")]
    NegativeCommission(String),
    #[error("product id is required")]
    MissingProduct,
}

/// Failure talking to the backend API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("response from {url} could not be decoded: {message}")]
    Decode { url: String, message: String },
}

/// Text that could not be turned back into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{0}' is not a recognised date")]
    Date(String),
    #[error("'{0}' is not a decimal number")]
    Decimal(String),
    #[error("'{0}' has more than two decimal places")]
    Precision(String),
    #[error("'{0}' is out of range")]
    Range(String),
}

/// A value the formatter refuses to render.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FormatError {
    #[error("cannot format non-finite amount {0}")]
    NonFinite(f64),
}
