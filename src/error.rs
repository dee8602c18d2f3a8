use thiserror::Error;

/// Errors detected before any automation capability is invoked.
///
/// Every bounds/kind check in the crate goes through this type; actions never
/// re-implement inline guards. Each variant renders as the human-readable
/// reason surfaced to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("parameter '{name}' must be {expected}")]
    WrongKind { name: String, expected: &'static str },

    #[error("{axis} coordinate cannot be negative: {value}")]
    NegativeCoordinate { axis: &'static str, value: i64 },

    #[error("{axis} coordinate {value} exceeds screen {axis} limit {limit}")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: i64,
        limit: i32,
    },

    #[error("duration must be positive: {0}")]
    NonPositiveDuration(f64),

    #[error("delay cannot be negative: {0}")]
    NegativeDelay(f64),

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("unknown modifier '{0}' (valid: ctrl, alt, shift, meta/win/cmd)")]
    UnknownModifier(String),
}
