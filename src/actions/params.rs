//! Argument-bag extraction and validation primitives
//!
//! The single source of truth for required/optional parameter resolution and
//! for bounds checks on coordinates, durations, and delays. Actions call these
//! instead of repeating guard clauses inline.

use serde_json::Value;

use crate::error::ValidationError;

// ============ Argument extraction ============

/// Required numeric parameter
pub fn require_number(params: &Value, name: &str) -> Result<f64, ValidationError> {
    match params.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingParameter(name.to_string())),
        Some(value) => value.as_f64().ok_or(ValidationError::WrongKind {
            name: name.to_string(),
            expected: "a number",
        }),
    }
}

/// Required string parameter
pub fn require_string<'a>(params: &'a Value, name: &str) -> Result<&'a str, ValidationError> {
    match params.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingParameter(name.to_string())),
        Some(value) => value.as_str().ok_or(ValidationError::WrongKind {
            name: name.to_string(),
            expected: "a string",
        }),
    }
}

/// Optional boolean, resolved to `default` when absent or null
pub fn optional_bool(params: &Value, name: &str, default: bool) -> Result<bool, ValidationError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value.as_bool().ok_or(ValidationError::WrongKind {
            name: name.to_string(),
            expected: "a boolean",
        }),
    }
}

/// Optional number, resolved to `default` when absent or null
pub fn optional_number(params: &Value, name: &str, default: f64) -> Result<f64, ValidationError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value.as_f64().ok_or(ValidationError::WrongKind {
            name: name.to_string(),
            expected: "a number",
        }),
    }
}

/// Optional number with no default
pub fn optional_number_opt(params: &Value, name: &str) -> Result<Option<f64>, ValidationError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or(ValidationError::WrongKind {
                name: name.to_string(),
                expected: "a number",
            }),
    }
}

/// Optional string with no default
pub fn optional_string<'a>(
    params: &'a Value,
    name: &str,
) -> Result<Option<&'a str>, ValidationError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or(ValidationError::WrongKind {
                name: name.to_string(),
                expected: "a string",
            }),
    }
}

/// Optional ordered list of strings, resolved to empty when absent or null
pub fn optional_string_list(params: &Value, name: &str) -> Result<Vec<String>, ValidationError> {
    let wrong_kind = || ValidationError::WrongKind {
        name: name.to_string(),
        expected: "an array of strings",
    };

    match params.get(name) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(wrong_kind))
            .collect(),
        Some(_) => Err(wrong_kind()),
    }
}

// ============ Bounds validation ============

/// Validate a coordinate against `[0, limit]` for the given axis.
///
/// The upper bound is inclusive: a value equal to the screen width/height is
/// accepted, matching the edge-of-screen behavior callers rely on.
pub fn validate_coordinate(
    value: f64,
    axis: &'static str,
    limit: i32,
) -> Result<i32, ValidationError> {
    let v = value as i64;
    if v < 0 {
        return Err(ValidationError::NegativeCoordinate { axis, value: v });
    }
    if v > limit as i64 {
        return Err(ValidationError::CoordinateOutOfRange {
            axis,
            value: v,
            limit,
        });
    }
    Ok(v as i32)
}

/// Validate a smooth-move duration in seconds; must be strictly positive
pub fn validate_duration(value: f64) -> Result<f64, ValidationError> {
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveDuration(value));
    }
    Ok(value)
}

/// Validate a per-character delay in milliseconds; zero is legal
pub fn validate_delay(value: f64) -> Result<u64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeDelay(value));
    }
    Ok(value as u64)
}
