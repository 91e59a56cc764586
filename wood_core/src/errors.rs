//! # Error Types
//!
//! Structured error types for wood_core. Every public calculation validates its
//! inputs on entry and fails with one of two kinds:
//!
//! - [`CalcError::InvalidType`] - a value that should be numeric is not
//! - [`CalcError::InvalidArgument`] - a number violates a physical precondition
//!
//! Both carry the field name, the rejected value and a human-readable reason so
//! a presentation layer can show the message as-is.
//!
//! ## Example
//!
//! ```rust
//! use wood_core::errors::{CalcError, CalcResult};
//!
//! fn validate_moisture(moisture_pct: f64) -> CalcResult<()> {
//!     if moisture_pct < 0.0 {
//!         return Err(CalcError::invalid_argument(
//!             "moisture_content",
//!             moisture_pct.to_string(),
//!             "Moisture content must be non-negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_moisture(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wood_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A value expected to be numeric is not (text, NaN, infinity, wrong JSON type)
    #[error("Invalid type for '{field}': {value} - {reason}")]
    InvalidType {
        field: String,
        value: String,
        reason: String,
    },

    /// A numeric value violates a domain precondition (negative moisture, negative dimension, ...)
    #[error("Invalid argument for '{field}': {value} - {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidType error
    pub fn invalid_type(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidType {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidArgument {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the input field that was rejected
    pub fn field(&self) -> &str {
        match self {
            CalcError::InvalidType { field, .. } | CalcError::InvalidArgument { field, .. } => field,
        }
    }

    /// Human-readable reason, without the field/value prefix
    pub fn reason(&self) -> &str {
        match self {
            CalcError::InvalidType { reason, .. } | CalcError::InvalidArgument { reason, .. } => reason,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidType { .. } => "INVALID_TYPE",
            CalcError::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_argument("moisture_content", "-5", "Moisture content must be non-negative");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidArgument\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_type("width_m", "abc", "not a number").error_code(), "INVALID_TYPE");
        assert_eq!(CalcError::invalid_argument("width_m", "-1", "negative").error_code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_message_names_field() {
        let error = CalcError::invalid_argument("depth_m", "-0.15", "Element dimensions must be non-negative");
        let message = error.to_string();
        assert!(message.contains("depth_m"));
        assert!(message.contains("non-negative"));
        assert_eq!(error.field(), "depth_m");
        assert_eq!(error.reason(), "Element dimensions must be non-negative");
    }
}
