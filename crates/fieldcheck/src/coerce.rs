//! Coercion of dynamic values into the primitive types rules compare.
//!
//! Every conversion except [`to_string`] can fail. Failures are cheap signals
//! for predicates, which read them as "rule not satisfied".

use crate::error::CoercionError;
use crate::value::Value;
use chrono::{DateTime, Utc};

/// Render any value as text. Never fails.
pub fn to_string(value: &Value) -> String {
    value.to_string()
}

/// Render a value as text for format and length rules.
///
/// `Null` has no text and yields `None`, so those rules reject it instead of
/// testing the literal `"null"`.
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(to_string(other)),
    }
}

/// String-rendered equality used by the comparison rules. `Null` equals only
/// `Null`.
pub fn same_text(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => to_string(a) == to_string(b),
    }
}

/// Convert to `f64`.
///
/// Numeric kinds convert directly and strings are parsed as float literals.
/// Anything else fails.
pub fn to_float(value: &Value) -> Result<f64, CoercionError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::UInt(n) => Ok(*n as f64),
        Value::Float(n) => Ok(*n),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|source| CoercionError::InvalidFloat {
                input: s.clone(),
                source,
            }),
        other => Err(CoercionError::Unsupported {
            target: "float",
            kind: other.kind(),
        }),
    }
}

/// [`to_float`], yielding `0.0` on failure.
pub fn to_float_or_default(value: &Value) -> f64 {
    to_float(value).unwrap_or(0.0)
}

/// Convert to `i64`.
///
/// Integer kinds convert directly (unsigned values above `i64::MAX` wrap, as
/// a plain cast does) and strings are parsed as base-10 integers. Floats are
/// not accepted.
pub fn to_int(value: &Value) -> Result<i64, CoercionError> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::UInt(n) => Ok(*n as i64),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|source| CoercionError::InvalidInt {
                input: s.clone(),
                source,
            }),
        other => Err(CoercionError::Unsupported {
            target: "int",
            kind: other.kind(),
        }),
    }
}

/// [`to_int`], yielding `0` on failure.
pub fn to_int_or_default(value: &Value) -> i64 {
    to_int(value).unwrap_or(0)
}

/// Parse a canonical boolean literal.
///
/// `1 t T TRUE true True` are true, `0 f F FALSE false False` are false.
pub fn to_boolean(text: &str) -> Result<bool, CoercionError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(CoercionError::InvalidBool(other.to_string())),
    }
}

/// Convert to a UTC timestamp.
///
/// Timestamps pass through, strings must be RFC 3339, and everything else is
/// read through [`to_int`] as Unix epoch seconds. A failed integer conversion
/// is an error; there is no fallback to the current time.
pub fn to_timestamp(value: &Value) -> Result<DateTime<Utc>, CoercionError> {
    match value {
        Value::Timestamp(t) => Ok(*t),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|source| CoercionError::InvalidTimestamp {
                input: s.clone(),
                source,
            }),
        other => {
            let secs = to_int(other)?;
            DateTime::from_timestamp(secs, 0).ok_or(CoercionError::TimestampOutOfRange(secs))
        }
    }
}
