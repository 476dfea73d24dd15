//! Declarative schema definitions.
//!
//! A [`SchemaDefinition`] is the serde form of a [`Schema`]: an ordered list
//! of fields, each with an ordered list of named rules.
//!
//! ```json
//! {
//!   "fields": [
//!     {
//!       "name": "age",
//!       "alias": "Age",
//!       "rules": [
//!         { "rule": "required", "message": "age is required" },
//!         { "rule": "between", "message": "age must be 18-120", "args": [18, 120] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Rule names are checked when the definition is loaded, as are argument
//! counts and `regexp` patterns, so a schema that loads will not trip over
//! its own configuration at validation time.

use crate::error::SchemaError;
use crate::rule::{RuleItem, RuleKind};
use crate::schema::Schema;
use crate::value::Value;
use fieldcheck_patterns::{anchored, PatternCache, PatternLibrary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Serializable form of a [`Schema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub fields: Vec<FieldDefinition>,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alias: String,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// One rule by name, with its message and arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub rule: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

impl RuleDefinition {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: String::new(),
            args: Vec::new(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn from_item(item: &RuleItem) -> Self {
        Self {
            rule: item.kind().as_str().to_string(),
            message: item.message().to_string(),
            args: item.args().to_vec(),
        }
    }

    /// Human-readable form, e.g. `between(18, 120)`. Strings are quoted.
    pub fn pretty_print(&self) -> String {
        self.to_string()
    }

    fn resolve(&self, field: &str) -> Result<RuleKind, SchemaError> {
        let kind: RuleKind = self.rule.parse()?;

        let arity = kind.arity();
        if !arity.accepts(self.args.len()) {
            return Err(SchemaError::Arity {
                field: field.to_string(),
                rule: self.rule.clone(),
                expected: kind.min_args(),
                actual: self.args.len(),
            });
        }

        if kind == RuleKind::Regexp {
            let source = self.args[0].to_string();
            PatternCache::global()
                .get_or_compile(&anchored(&source))
                .map_err(|source| SchemaError::Pattern {
                    field: field.to_string(),
                    rule: self.rule.clone(),
                    source,
                })?;
        }

        Ok(kind)
    }
}

impl fmt::Display for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return f.write_str(&self.rule);
        }
        let args: Vec<String> = self.args.iter().map(|a| a.to_json().to_string()).collect();
        write!(f, "{}({})", self.rule, args.join(", "))
    }
}

impl SchemaDefinition {
    /// Parse a definition from JSON text without resolving it.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Describe an existing schema. Custom rules have no textual form and are
    /// left out.
    pub fn from_schema(schema: &Schema) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|field| FieldDefinition {
                name: field.name().to_string(),
                alias: field.alias().to_string(),
                rules: field
                    .chain()
                    .iter()
                    .filter(|item| {
                        let custom = item.kind().is_custom();
                        if custom {
                            tracing::debug!(
                                field = field.name(),
                                rule = %item.kind(),
                                "Skipping custom rule in schema definition"
                            );
                        }
                        !custom
                    })
                    .map(RuleDefinition::from_item)
                    .collect(),
            })
            .collect();
        Self { fields }
    }

    /// Pretty-print the schema, one field per line.
    pub fn pretty_print(&self) -> String {
        self.fields
            .iter()
            .map(|field| {
                let rules: Vec<String> = field.rules.iter().map(|r| r.to_string()).collect();
                format!("{}: {}", field.name, rules.join(" -> "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Schema {
    /// Build a schema from a definition, using the global pattern library.
    pub fn from_definition(definition: &SchemaDefinition) -> Result<Self, SchemaError> {
        let mut schema = Schema::new();
        schema.load(definition)?;
        Ok(schema)
    }

    /// Build a schema from a definition whose rules consult `patterns`.
    pub fn from_definition_with_patterns(
        definition: &SchemaDefinition,
        patterns: impl Into<Arc<PatternLibrary>>,
    ) -> Result<Self, SchemaError> {
        let mut schema = Schema::with_patterns(patterns);
        schema.load(definition)?;
        Ok(schema)
    }

    /// Parse and build a schema from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Self::from_definition(&SchemaDefinition::from_json_str(json)?)
    }

    pub fn to_definition(&self) -> SchemaDefinition {
        SchemaDefinition::from_schema(self)
    }

    fn load(&mut self, definition: &SchemaDefinition) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &definition.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        // Resolve everything before touching the schema so a bad rule leaves
        // it unchanged.
        let mut resolved = Vec::with_capacity(definition.fields.len());
        for field in &definition.fields {
            let kinds = field
                .rules
                .iter()
                .map(|rule| rule.resolve(&field.name))
                .collect::<Result<Vec<_>, _>>()?;
            resolved.push((field, kinds));
        }

        for (field, kinds) in resolved {
            let chain = self.add_field(field.name.as_str(), field.alias.as_str());
            for (rule, kind) in field.rules.iter().zip(kinds) {
                chain.push(kind, rule.message.as_str(), rule.args.clone());
            }
        }

        tracing::debug!(fields = definition.fields.len(), "Loaded schema definition");
        Ok(())
    }
}
