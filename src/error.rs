//! Error types for projections, rate loading and rate fetching

use thiserror::Error;

/// Errors raised while assembling or evaluating a projection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Principal was negative, NaN or infinite
    #[error("Invalid principal: {0} (must be a finite amount >= 0)")]
    InvalidPrincipal(f64),

    /// Duration outside the supported 1..=10 year window
    #[error("Duration out of range: {years} years (expected {min}-{max})")]
    DurationOutOfRange { years: u32, min: u32, max: u32 },

    /// Percentage change requested against a zero invested amount
    #[error("Division by zero: invested amount is 0")]
    DivisionByZero,

    /// Unrecognised frequency name
    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),
}

/// Errors from fetching pool data over HTTP
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Transport failure (connect, timeout, TLS)
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Body could not be decoded into the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Errors from loading a rate table from disk
#[derive(Error, Debug)]
pub enum RateLoadError {
    #[error("Failed to read rate file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid rate JSON: {0}")]
    Json(#[from] serde_json::Error),
}
