//! Error types: coercion failures, schema loading failures, and the
//! [`ErrorRecord`] describing the first rule a record violated.

use crate::rule::RuleKind;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A value could not be converted to the type a rule needed.
///
/// Predicates treat this as "rule not satisfied"; it never reaches the
/// caller of [`Validator::validate`](crate::Validator::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("cannot convert {kind} to {target}")]
    Unsupported {
        target: &'static str,
        kind: ValueKind,
    },

    #[error("invalid float literal `{input}`: {source}")]
    InvalidFloat {
        input: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("invalid integer literal `{input}`: {source}")]
    InvalidInt {
        input: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid boolean literal `{0}`")]
    InvalidBool(String),

    #[error("invalid RFC 3339 timestamp `{input}`: {source}")]
    InvalidTimestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("epoch seconds out of range: {0}")]
    TimestampOutOfRange(i64),
}

/// Failure to build a [`Schema`](crate::Schema) from a declarative definition.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("field `{0}` is defined more than once")]
    DuplicateField(String),

    #[error("rule `{rule}` on field `{field}` expects {expected} argument(s), got {actual}")]
    Arity {
        field: String,
        rule: String,
        expected: usize,
        actual: usize,
    },

    #[error("rule `{rule}` on field `{field}`: {source}")]
    Pattern {
        field: String,
        rule: String,
        #[source]
        source: fieldcheck_patterns::PatternError,
    },

    #[error("invalid schema definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// A JSON document could not be turned into a [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(String),
}

/// Snapshot of the first failing rule of a validation run.
///
/// The message is whatever the caller attached to the rule, returned
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    field: String,
    alias: String,
    field_value: Option<Value>,
    rule: RuleKind,
    args: Vec<Value>,
    message: String,
}

impl ErrorRecord {
    pub(crate) fn new(
        field: impl Into<String>,
        alias: impl Into<String>,
        field_value: Option<Value>,
        rule: RuleKind,
        args: Vec<Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            alias: alias.into(),
            field_value,
            rule,
            args,
            message: message.into(),
        }
    }

    /// Name of the failing field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Display label registered with the field.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The record's value for the field, `None` if it was absent.
    pub fn field_value(&self) -> Option<&Value> {
        self.field_value.as_ref()
    }

    pub fn rule(&self) -> &RuleKind {
        &self.rule
    }

    /// Arguments bound to the rule when it was added.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert to the standard `validation_error` response body.
    pub fn to_api_error(&self) -> ApiValidationError {
        let mut params = HashMap::new();
        if !self.args.is_empty() {
            params.insert(
                "args".to_string(),
                serde_json::Value::Array(self.args.iter().map(Value::to_json).collect()),
            );
        }
        if let Some(value) = &self.field_value {
            params.insert("value".to_string(), value.to_json());
        }
        if !self.alias.is_empty() {
            params.insert(
                "alias".to_string(),
                serde_json::Value::String(self.alias.clone()),
            );
        }

        ApiValidationError {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: "Validation failed".to_string(),
                fields: vec![FieldErrorResponse {
                    field: self.field.clone(),
                    code: self.rule.as_str().to_string(),
                    message: self.message.clone(),
                    params: if params.is_empty() { None } else { Some(params) },
                }],
            },
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "field `{}` failed rule `{}`", self.field, self.rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl std::error::Error for ErrorRecord {}

/// API response format for a failed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiValidationError {
    pub error: ErrorBody,
}

/// Error body in an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    pub fields: Vec<FieldErrorResponse>,
}

/// Single field error in an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, serde_json::Value>>,
}
