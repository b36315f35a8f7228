//! Error types for pace-mcp.
//!
//! The formatting functions never fail; these errors come only from the
//! checked formatting variants and from configuration loading.

use thiserror::Error;

/// The main error type for pace-mcp operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A checked formatter was given a negative or non-finite value.
    #[error("invalid argument '{name}': {value} (expected a finite, non-negative number)")]
    InvalidArgument {
        /// Name of the rejected argument.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An environment variable holds a value we do not understand.
    #[error("invalid value '{value}' for {key} (expected {expected})")]
    InvalidConfig {
        /// Environment variable name.
        key: &'static str,
        /// The raw value found.
        value: String,
        /// Human readable list of accepted values.
        expected: &'static str,
    },
}

/// Result type alias for pace-mcp operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Reject `value` unless it is finite and non-negative.
    pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(Error::InvalidArgument { name, value })
        }
    }
}
