//! Rule kinds, rule items and the fluent [`RuleChain`] builder.

use crate::error::SchemaError;
use crate::predicates;
use crate::value::{Record, Value};
use fieldcheck_patterns::PatternLibrary;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A predicate evaluated against one field of a record.
pub type Predicate = Arc<dyn Fn(&RuleContext<'_>) -> bool + Send + Sync>;

/// Everything a predicate can see while it runs.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub record: &'a Record,
    pub field: &'a str,
    pub args: &'a [Value],
    pub patterns: &'a PatternLibrary,
}

impl<'a> RuleContext<'a> {
    /// The value under evaluation, `None` if the field is absent.
    pub fn value(&self) -> Option<&'a Value> {
        self.record.get(self.field)
    }

    /// The `index`-th bound argument, if one was supplied.
    pub fn arg(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index)
    }
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("field", &self.field)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// How many arguments a rule kind takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }

    fn minimum(&self) -> usize {
        match *self {
            Arity::Exact(n) | Arity::AtLeast(n) => n,
            Arity::Any => 0,
        }
    }
}

/// The catalog of rule kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Bool,
    Alpha,
    AlphaNumeric,
    AlphaDash,
    Between,
    Float,
    TimeBefore,
    TimeAfter,
    Equal,
    Different,
    EqualWithColumn,
    DifferentWithColumn,
    In,
    NotIn,
    Integer,
    Ip,
    Length,
    LengthMin,
    LengthMax,
    BetweenLen,
    Max,
    Min,
    Money,
    Regexp,
    Username,
    Host,
    Email,
    CreditCard,
    Numeric,
    HexColor,
    RgbColor,
    Ascii,
    Base64,
    DnsName,
    Url,
    /// A caller-defined predicate registered with [`RuleChain::custom`].
    Custom(String),
}

impl RuleKind {
    /// Every built-in kind.
    pub const BUILTIN: [RuleKind; 36] = [
        RuleKind::Required,
        RuleKind::Bool,
        RuleKind::Alpha,
        RuleKind::AlphaNumeric,
        RuleKind::AlphaDash,
        RuleKind::Between,
        RuleKind::Float,
        RuleKind::TimeBefore,
        RuleKind::TimeAfter,
        RuleKind::Equal,
        RuleKind::Different,
        RuleKind::EqualWithColumn,
        RuleKind::DifferentWithColumn,
        RuleKind::In,
        RuleKind::NotIn,
        RuleKind::Integer,
        RuleKind::Ip,
        RuleKind::Length,
        RuleKind::LengthMin,
        RuleKind::LengthMax,
        RuleKind::BetweenLen,
        RuleKind::Max,
        RuleKind::Min,
        RuleKind::Money,
        RuleKind::Regexp,
        RuleKind::Username,
        RuleKind::Host,
        RuleKind::Email,
        RuleKind::CreditCard,
        RuleKind::Numeric,
        RuleKind::HexColor,
        RuleKind::RgbColor,
        RuleKind::Ascii,
        RuleKind::Base64,
        RuleKind::DnsName,
        RuleKind::Url,
    ];

    /// The rule name reported in errors.
    pub fn as_str(&self) -> &str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Bool => "bool",
            RuleKind::Alpha => "alpha",
            RuleKind::AlphaNumeric => "alphaNumeric",
            RuleKind::AlphaDash => "alphaDash",
            RuleKind::Between => "between",
            RuleKind::Float => "float",
            RuleKind::TimeBefore => "timeBefore",
            RuleKind::TimeAfter => "timeAfter",
            RuleKind::Equal => "equal",
            RuleKind::Different => "different",
            RuleKind::EqualWithColumn => "equalWithColumn",
            RuleKind::DifferentWithColumn => "differentWithColumn",
            RuleKind::In => "in",
            RuleKind::NotIn => "notIn",
            RuleKind::Integer => "integer",
            RuleKind::Ip => "ip",
            RuleKind::Length => "length",
            RuleKind::LengthMin => "lengthMin",
            RuleKind::LengthMax => "lengthMax",
            RuleKind::BetweenLen => "betweenLen",
            RuleKind::Max => "max",
            RuleKind::Min => "min",
            RuleKind::Money => "money",
            RuleKind::Regexp => "regexp",
            RuleKind::Username => "username",
            RuleKind::Host => "host",
            RuleKind::Email => "email",
            RuleKind::CreditCard => "creditCard",
            RuleKind::Numeric => "numeric",
            RuleKind::HexColor => "hexColor",
            RuleKind::RgbColor => "rgbColor",
            RuleKind::Ascii => "ascii",
            RuleKind::Base64 => "base64",
            RuleKind::DnsName => "dnsName",
            RuleKind::Url => "url",
            RuleKind::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RuleKind::Custom(_))
    }

    /// Number of arguments the rule expects.
    pub fn arity(&self) -> Arity {
        match self {
            RuleKind::Between | RuleKind::BetweenLen => Arity::Exact(2),
            RuleKind::Equal
            | RuleKind::Different
            | RuleKind::EqualWithColumn
            | RuleKind::DifferentWithColumn
            | RuleKind::TimeBefore
            | RuleKind::TimeAfter
            | RuleKind::Length
            | RuleKind::LengthMin
            | RuleKind::LengthMax
            | RuleKind::Max
            | RuleKind::Min
            | RuleKind::Regexp => Arity::Exact(1),
            RuleKind::In => Arity::AtLeast(1),
            RuleKind::NotIn => Arity::AtLeast(0),
            RuleKind::Custom(_) => Arity::Any,
            _ => Arity::Exact(0),
        }
    }

    /// Minimum number of arguments the predicate needs to have a chance of
    /// succeeding.
    pub fn min_args(&self) -> usize {
        self.arity().minimum()
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses built-in names only; custom kinds cannot be named from text.
impl FromStr for RuleKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::BUILTIN
            .iter()
            .find(|kind| kind.as_str() == s)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownRule(s.to_string()))
    }
}

impl Serialize for RuleKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// One constraint in a chain: kind, caller message, bound arguments and the
/// predicate that evaluates it.
#[derive(Clone)]
pub struct RuleItem {
    kind: RuleKind,
    message: String,
    args: Vec<Value>,
    predicate: Predicate,
}

impl RuleItem {
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Evaluate the predicate for `field` of `record`.
    pub fn check(&self, record: &Record, field: &str, patterns: &PatternLibrary) -> bool {
        let ctx = RuleContext {
            record,
            field,
            args: &self.args,
            patterns,
        };
        (self.predicate)(&ctx)
    }
}

impl fmt::Debug for RuleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleItem")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Ordered rules for one field.
///
/// Each builder method appends one rule and returns the chain so calls can be
/// strung together. Nothing is evaluated while building.
///
/// ## Example
///
/// ```rust
/// use fieldcheck::Validator;
///
/// let mut validator = Validator::new();
/// validator
///     .add_field("age", "Age")
///     .required("age is required")
///     .integer("age must be a whole number")
///     .between(18, 120, "age must be between 18 and 120");
///
/// assert_eq!(validator.schema().field("age").unwrap().chain().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    items: Vec<RuleItem>,
}

impl RuleChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[RuleItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a rule of any kind with untyped arguments.
    ///
    /// Argument counts are not checked here: a rule that receives fewer
    /// arguments than it needs simply fails when evaluated. A
    /// [`RuleKind::Custom`] appended this way has no predicate and never
    /// passes; use [`custom`](Self::custom) instead.
    pub fn push(
        &mut self,
        kind: RuleKind,
        message: impl Into<String>,
        args: Vec<Value>,
    ) -> &mut Self {
        let predicate = predicates::for_kind(&kind);
        self.items.push(RuleItem {
            kind,
            message: message.into(),
            args,
            predicate,
        });
        self
    }

    fn rule(&mut self, kind: RuleKind, message: impl Into<String>) -> &mut Self {
        self.push(kind, message, Vec::new())
    }

    /// Append a caller-defined predicate under `name`.
    ///
    /// Unlike the built-in rules, a custom predicate also runs for absent
    /// fields; check [`RuleContext::value`] if it should not.
    pub fn custom<F>(
        &mut self,
        name: impl Into<String>,
        message: impl Into<String>,
        args: Vec<Value>,
        predicate: F,
    ) -> &mut Self
    where
        F: Fn(&RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.items.push(RuleItem {
            kind: RuleKind::Custom(name.into()),
            message: message.into(),
            args,
            predicate: Arc::new(predicate),
        });
        self
    }

    /// The field must be present. A `Null` value counts as present.
    pub fn required(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Required, message)
    }

    /// The value must render as a canonical boolean literal.
    pub fn boolean(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Bool, message)
    }

    /// ASCII letters only.
    pub fn alpha(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Alpha, message)
    }

    /// ASCII letters and digits only.
    pub fn alpha_numeric(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::AlphaNumeric, message)
    }

    /// ASCII letters, digits, dashes and underscores only.
    pub fn alpha_dash(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::AlphaDash, message)
    }

    /// Numeric value within `[min, max]`, both ends inclusive.
    pub fn between(
        &mut self,
        min: impl Into<Value>,
        max: impl Into<Value>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.push(RuleKind::Between, message, vec![min.into(), max.into()])
    }

    /// A float literal.
    pub fn float(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Float, message)
    }

    /// A timestamp strictly before `reference`.
    pub fn time_before(
        &mut self,
        reference: impl Into<Value>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.push(RuleKind::TimeBefore, message, vec![reference.into()])
    }

    /// A timestamp strictly after `reference`.
    pub fn time_after(
        &mut self,
        reference: impl Into<Value>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.push(RuleKind::TimeAfter, message, vec![reference.into()])
    }

    /// Renders the same as `expected`.
    pub fn equal(&mut self, expected: impl Into<Value>, message: impl Into<String>) -> &mut Self {
        self.push(RuleKind::Equal, message, vec![expected.into()])
    }

    /// Renders differently from `unexpected`.
    pub fn different(
        &mut self,
        unexpected: impl Into<Value>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.push(RuleKind::Different, message, vec![unexpected.into()])
    }

    /// Renders the same as the record's `column` field.
    pub fn equal_with_column(
        &mut self,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.push(
            RuleKind::EqualWithColumn,
            message,
            vec![Value::String(column.into())],
        )
    }

    /// Renders differently from the record's `column` field.
    pub fn different_with_column(
        &mut self,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.push(
            RuleKind::DifferentWithColumn,
            message,
            vec![Value::String(column.into())],
        )
    }

    /// Renders the same as one of `allowed`.
    pub fn is_in<I, V>(&mut self, allowed: I, message: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args = allowed.into_iter().map(Into::into).collect();
        self.push(RuleKind::In, message, args)
    }

    /// Renders differently from every entry of `denied`.
    pub fn not_in<I, V>(&mut self, denied: I, message: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args = denied.into_iter().map(Into::into).collect();
        self.push(RuleKind::NotIn, message, args)
    }

    /// An integer literal.
    pub fn integer(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Integer, message)
    }

    /// An IPv4 or IPv6 address.
    pub fn ip(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Ip, message)
    }

    /// Exactly `len` characters.
    pub fn length(&mut self, len: usize, message: impl Into<String>) -> &mut Self {
        self.push(RuleKind::Length, message, vec![len.into()])
    }

    /// At least `len` characters.
    pub fn length_min(&mut self, len: usize, message: impl Into<String>) -> &mut Self {
        self.push(RuleKind::LengthMin, message, vec![len.into()])
    }

    /// At most `len` characters.
    pub fn length_max(&mut self, len: usize, message: impl Into<String>) -> &mut Self {
        self.push(RuleKind::LengthMax, message, vec![len.into()])
    }

    /// Between `min` and `max` characters, inclusive.
    pub fn between_len(
        &mut self,
        min: usize,
        max: usize,
        message: impl Into<String>,
    ) -> &mut Self {
        self.push(RuleKind::BetweenLen, message, vec![min.into(), max.into()])
    }

    /// Numeric value no greater than `max`.
    pub fn max(&mut self, max: impl Into<Value>, message: impl Into<String>) -> &mut Self {
        self.push(RuleKind::Max, message, vec![max.into()])
    }

    /// Numeric value no less than `min`.
    pub fn min(&mut self, min: impl Into<Value>, message: impl Into<String>) -> &mut Self {
        self.push(RuleKind::Min, message, vec![min.into()])
    }

    /// A currency amount.
    pub fn money(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Money, message)
    }

    /// Full match against a caller-supplied expression.
    pub fn regexp(&mut self, pattern: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.push(
            RuleKind::Regexp,
            message,
            vec![Value::String(pattern.into())],
        )
    }

    pub fn username(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Username, message)
    }

    pub fn host(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Host, message)
    }

    pub fn email(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Email, message)
    }

    pub fn credit_card(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::CreditCard, message)
    }

    /// Unsigned decimal digits.
    pub fn numeric(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Numeric, message)
    }

    pub fn hex_color(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::HexColor, message)
    }

    pub fn rgb_color(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::RgbColor, message)
    }

    pub fn ascii(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Ascii, message)
    }

    pub fn base64(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Base64, message)
    }

    pub fn dns_name(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::DnsName, message)
    }

    pub fn url(&mut self, message: impl Into<String>) -> &mut Self {
        self.rule(RuleKind::Url, message)
    }
}
