//! The validation engine.

use crate::error::ErrorRecord;
use crate::rule::RuleChain;
use crate::schema::Schema;
use crate::value::{Record, Value};
use fieldcheck_patterns::PatternLibrary;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// Runs a [`Schema`] against records.
///
/// Fields are checked in declaration order and each field's rules in the
/// order they were added. The first rule that is not satisfied ends the run:
/// later rules and later fields are not evaluated.
///
/// Validation takes `&self` and keeps no per-run state, so one validator can
/// be shared across threads.
///
/// ## Example
///
/// ```rust
/// use fieldcheck::{record, Validator};
///
/// let mut validator = Validator::new();
/// validator
///     .add_field("username", "User name")
///     .required("username is required")
///     .alpha_numeric("username must be alphanumeric")
///     .length(4, "username must be 4 characters");
///
/// let result = validator.validate(&record! { "username" => "test" });
/// assert!(result.is_valid());
/// assert_eq!(result.validated().get("username").unwrap().to_string(), "test");
///
/// let result = validator.validate(&record! { "username" => "te_t" });
/// assert_eq!(result.error().unwrap().message(), "username must be alphanumeric");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    schema: Schema,
}

impl Validator {
    /// A validator with an empty schema and the global pattern library.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with an empty schema whose rules consult `patterns`.
    pub fn with_patterns(patterns: impl Into<Arc<PatternLibrary>>) -> Self {
        Self::from_schema(Schema::with_patterns(patterns))
    }

    pub fn from_schema(schema: Schema) -> Self {
        Self { schema }
    }

    /// Declare a field and get its rule chain. See [`Schema::add_field`].
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        alias: impl Into<String>,
    ) -> &mut RuleChain {
        self.schema.add_field(name, alias)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }

    /// Validate `record`, stopping at the first failed rule.
    pub fn validate(&self, record: &Record) -> ValidationResult {
        let patterns = self.schema.patterns();
        let mut validated = ValidatedData::with_capacity(self.schema.len());

        for field in self.schema.fields() {
            for item in field.chain().iter() {
                if item.check(record, field.name(), patterns) {
                    continue;
                }

                tracing::debug!(
                    field = field.name(),
                    rule = %item.kind(),
                    "Validation failed"
                );
                return ValidationResult::failed(ErrorRecord::new(
                    field.name(),
                    field.alias(),
                    record.get(field.name()).cloned(),
                    item.kind().clone(),
                    item.args().to_vec(),
                    item.message(),
                ));
            }

            tracing::trace!(field = field.name(), "Field passed");
            if let Some(value) = record.get(field.name()) {
                validated.push(field.name(), value.clone());
            }
        }

        tracing::trace!(fields = validated.len(), "Validation passed");
        ValidationResult::passed(validated)
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    validated: ValidatedData,
    error: Option<ErrorRecord>,
}

impl ValidationResult {
    fn passed(validated: ValidatedData) -> Self {
        Self {
            validated,
            error: None,
        }
    }

    fn failed(error: ErrorRecord) -> Self {
        Self {
            validated: ValidatedData::default(),
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The first failed rule, if any.
    pub fn error(&self) -> Option<&ErrorRecord> {
        self.error.as_ref()
    }

    /// Values of the declared fields that were present, in declaration
    /// order. Empty when validation failed.
    pub fn validated(&self) -> &ValidatedData {
        &self.validated
    }

    pub fn into_result(self) -> Result<ValidatedData, ErrorRecord> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.validated),
        }
    }
}

/// Declared fields copied out of a record that passed validation.
///
/// Undeclared fields of the input are never included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedData {
    entries: Vec<(String, Value)>,
}

impl ValidatedData {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, name: &str, value: Value) {
        self.entries.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON object with keys in declaration order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    pub fn into_record(self) -> Record {
        self.entries.into_iter().collect()
    }
}

impl Serialize for ValidatedData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
