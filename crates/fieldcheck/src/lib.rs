//! # fieldcheck
//!
//! Declarative rule chains for validating flat, loosely-typed records.
//!
//! A [`Validator`] holds an ordered list of fields. Each field carries a
//! [`RuleChain`] built with fluent calls. Validating a [`Record`] walks the
//! fields in declaration order and stops at the first rule that fails,
//! reporting it as an [`ErrorRecord`] with the caller's own message.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldcheck::prelude::*;
//!
//! let mut validator = Validator::new();
//! validator
//!     .add_field("email", "Email")
//!     .required("email is required")
//!     .email("email is not valid");
//! validator
//!     .add_field("age", "Age")
//!     .integer("age must be a whole number")
//!     .between(18, 120, "age must be between 18 and 120");
//!
//! let ok = validator.validate(&record! { "email" => "ada@example.com", "age" => 36 });
//! assert!(ok.is_valid());
//!
//! let bad = validator.validate(&record! { "email" => "ada@example.com", "age" => 12 });
//! assert_eq!(bad.error().unwrap().message(), "age must be between 18 and 120");
//! ```
//!
//! ## Absent fields
//!
//! Only `required` fails for a field missing from the record; every other
//! built-in rule is satisfied by absence. A field present with a
//! [`Value::Null`] is present.
//!
//! ## Declarative schemas
//!
//! Schemas can also be loaded from JSON, see [`SchemaDefinition`].
//!
//! ## Patterns
//!
//! Character-class and format rules look their expressions up in a
//! [`PatternLibrary`]. The built-in library is used unless a schema is given
//! its own with [`Schema::with_patterns`].

pub mod coerce;
mod config;
mod engine;
mod error;
mod predicates;
mod rule;
mod schema;
mod value;

pub use config::{FieldDefinition, RuleDefinition, SchemaDefinition};
pub use engine::{ValidatedData, ValidationResult, Validator};
pub use error::{
    ApiValidationError, CoercionError, ErrorBody, ErrorRecord, FieldErrorResponse, RecordError,
    SchemaError,
};
pub use fieldcheck_patterns::{PatternLibrary, PatternName};
pub use rule::{Arity, Predicate, RuleChain, RuleContext, RuleItem, RuleKind};
pub use schema::{FieldDef, Schema};
pub use value::{Record, Value, ValueKind};

/// Everything needed to declare and run validations.
pub mod prelude {
    pub use crate::record;
    pub use crate::{
        ErrorRecord, Record, RuleChain, RuleContext, RuleKind, Schema, SchemaDefinition,
        ValidationResult, Validator, Value,
    };
}
