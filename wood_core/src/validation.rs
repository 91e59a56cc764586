//! # Input Validation
//!
//! Range checks shared by every calculation, plus the boundary helpers that
//! turn untyped caller input (command-line text, JSON documents) into `f64`.
//!
//! The calculation API itself only accepts `f64`, so "is this a number" is
//! settled by the type system. What remains is:
//!
//! - NaN and infinities, which are `f64` but not usable numbers -> `InvalidType`
//! - values outside their physical domain -> `InvalidArgument`
//!
//! ## Example
//!
//! ```rust
//! use wood_core::validation::parse_numeric;
//! use wood_core::CalcError;
//!
//! assert_eq!(parse_numeric("moisture_content", " 18.5 ").unwrap(), 18.5);
//!
//! let err = parse_numeric("moisture_content", "wet").unwrap_err();
//! assert!(matches!(err, CalcError::InvalidType { .. }));
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};

/// Reject NaN and infinities.
pub fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_type(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(value)
}

/// Require a finite, non-negative value. `reason` is used for the negative case.
pub fn require_non_negative(field: &str, value: f64, reason: &str) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_argument(field, value.to_string(), reason));
    }
    Ok(value)
}

/// Validate a moisture content given in percent.
pub fn moisture_content(value: f64) -> CalcResult<f64> {
    require_non_negative("moisture_content", value, "Moisture content must be non-negative")
}

/// Parse user-entered text as a number.
///
/// Surrounding whitespace is ignored. Anything that does not parse as a finite
/// `f64` fails with [`CalcError::InvalidType`].
pub fn parse_numeric(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        CalcError::invalid_type(field, trimmed, "Value must be a number (integer or decimal)")
    })?;
    require_finite(field, value)
}

/// Read a JSON value as a number.
///
/// Only JSON numbers are accepted; numeric-looking strings are rejected so that
/// `"12"` and `12` are not silently treated alike.
pub fn numeric_from_json(field: &str, value: &Value) -> CalcResult<f64> {
    match value.as_f64() {
        Some(number) => require_finite(field, number),
        None => Err(CalcError::invalid_type(
            field,
            value.to_string(),
            "Value must be a JSON number",
        )),
    }
}

/// Read a JSON value as a count (a whole, non-negative number).
///
/// Non-numbers fail with [`CalcError::InvalidType`]; negative or fractional
/// numbers fail with [`CalcError::InvalidArgument`].
pub fn count_from_json(field: &str, value: &Value) -> CalcResult<usize> {
    if !value.is_number() {
        return Err(CalcError::invalid_type(field, value.to_string(), "Value must be a JSON number"));
    }
    value
        .as_u64()
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(|| {
            CalcError::invalid_argument(field, value.to_string(), "Value must be a whole, non-negative count")
        })
}

/// Deserialize a calculation input from JSON after checking its numeric fields.
///
/// `numeric_fields` are JSON pointers (e.g. `/material/specific_gravity`). Each
/// one present in the document must be a number, otherwise the field is
/// reported with [`CalcError::InvalidType`]. Shape errors left over after that
/// (missing fields, unknown enum tags) are reported against `input`.
pub fn from_json_value<T: DeserializeOwned>(value: Value, numeric_fields: &[&str]) -> CalcResult<T> {
    for pointer in numeric_fields {
        if let Some(field_value) = value.pointer(pointer) {
            numeric_from_json(pointer.trim_start_matches('/'), field_value)?;
        }
    }
    serde_json::from_value(value)
        .map_err(|e| CalcError::invalid_type("input", "<json>", e.to_string()))
}
