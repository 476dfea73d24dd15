//! Built-in rule predicates.
//!
//! Every built-in predicate is vacuously satisfied when the field is absent
//! from the record, except `required`. A predicate that receives fewer
//! arguments than it needs is not satisfied. A present `Null` has no text:
//! format and length rules reject it and comparisons match it only against
//! `Null`.

use crate::coerce::{same_text, to_boolean, to_float, to_int, to_string, to_text, to_timestamp};
use crate::rule::{Predicate, RuleContext, RuleKind};
use crate::value::Value;
use fieldcheck_patterns::{anchored, PatternCache, PatternName};
use std::sync::Arc;

/// Resolve the predicate for a kind. Custom kinds resolve to one that never
/// passes.
pub(crate) fn for_kind(kind: &RuleKind) -> Predicate {
    match kind {
        RuleKind::Required => Arc::new(required),
        RuleKind::Bool => Arc::new(boolean),
        RuleKind::Alpha => pattern(PatternName::Alpha),
        RuleKind::AlphaNumeric => pattern(PatternName::AlphaNumeric),
        RuleKind::AlphaDash => pattern(PatternName::AlphaDash),
        RuleKind::Between => Arc::new(between),
        RuleKind::Float => pattern(PatternName::Float),
        RuleKind::TimeBefore => Arc::new(time_before),
        RuleKind::TimeAfter => Arc::new(time_after),
        RuleKind::Equal => Arc::new(equal),
        RuleKind::Different => Arc::new(different),
        RuleKind::EqualWithColumn => Arc::new(equal_with_column),
        RuleKind::DifferentWithColumn => Arc::new(different_with_column),
        RuleKind::In => Arc::new(is_in),
        RuleKind::NotIn => Arc::new(not_in),
        RuleKind::Integer => pattern(PatternName::Int),
        RuleKind::Ip => pattern(PatternName::Ip),
        RuleKind::Length => Arc::new(length),
        RuleKind::LengthMin => Arc::new(length_min),
        RuleKind::LengthMax => Arc::new(length_max),
        RuleKind::BetweenLen => Arc::new(between_len),
        RuleKind::Max => Arc::new(max),
        RuleKind::Min => Arc::new(min),
        RuleKind::Money => pattern(PatternName::Money),
        RuleKind::Regexp => Arc::new(regexp),
        RuleKind::Username => pattern(PatternName::Username),
        RuleKind::Host => pattern(PatternName::Host),
        RuleKind::Email => pattern(PatternName::Email),
        RuleKind::CreditCard => pattern(PatternName::CreditCard),
        RuleKind::Numeric => pattern(PatternName::Numeric),
        RuleKind::HexColor => pattern(PatternName::HexColor),
        RuleKind::RgbColor => pattern(PatternName::RgbColor),
        RuleKind::Ascii => pattern(PatternName::Ascii),
        RuleKind::Base64 => pattern(PatternName::Base64),
        RuleKind::DnsName => pattern(PatternName::DnsName),
        RuleKind::Url => pattern(PatternName::Url),
        RuleKind::Custom(name) => {
            let name = name.clone();
            Arc::new(move |ctx: &RuleContext<'_>| {
                tracing::warn!(rule = %name, field = ctx.field, "Custom rule has no predicate");
                false
            })
        }
    }
}

fn present(ctx: &RuleContext<'_>, check: impl FnOnce(&Value) -> bool) -> bool {
    ctx.value().map_or(true, check)
}

fn with_text(ctx: &RuleContext<'_>, check: impl FnOnce(&str) -> bool) -> bool {
    present(ctx, |v| to_text(v).is_some_and(|text| check(&text)))
}

fn pattern(name: PatternName) -> Predicate {
    Arc::new(move |ctx: &RuleContext<'_>| {
        with_text(ctx, |text| ctx.patterns.is_match(name.as_str(), text))
    })
}

fn required(ctx: &RuleContext<'_>) -> bool {
    ctx.record.contains(ctx.field)
}

fn boolean(ctx: &RuleContext<'_>) -> bool {
    with_text(ctx, |text| to_boolean(text).is_ok())
}

fn float_arg(ctx: &RuleContext<'_>, index: usize) -> Option<f64> {
    ctx.arg(index).and_then(|a| to_float(a).ok())
}

fn int_arg(ctx: &RuleContext<'_>, index: usize) -> Option<i64> {
    ctx.arg(index).and_then(|a| to_int(a).ok())
}

fn between(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| {
        match (to_float(v).ok(), float_arg(ctx, 0), float_arg(ctx, 1)) {
            (Some(n), Some(lo), Some(hi)) => n >= lo && n <= hi,
            _ => false,
        }
    })
}

fn max(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| match (to_float(v).ok(), float_arg(ctx, 0)) {
        (Some(n), Some(hi)) => n <= hi,
        _ => false,
    })
}

fn min(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| match (to_float(v).ok(), float_arg(ctx, 0)) {
        (Some(n), Some(lo)) => n >= lo,
        _ => false,
    })
}

fn char_len(text: &str) -> i64 {
    text.chars().count() as i64
}

fn length(ctx: &RuleContext<'_>) -> bool {
    with_text(ctx, |t| int_arg(ctx, 0).is_some_and(|n| char_len(t) == n))
}

fn length_min(ctx: &RuleContext<'_>) -> bool {
    with_text(ctx, |t| int_arg(ctx, 0).is_some_and(|n| char_len(t) >= n))
}

fn length_max(ctx: &RuleContext<'_>) -> bool {
    with_text(ctx, |t| int_arg(ctx, 0).is_some_and(|n| char_len(t) <= n))
}

fn between_len(ctx: &RuleContext<'_>) -> bool {
    with_text(ctx, |t| match (int_arg(ctx, 0), int_arg(ctx, 1)) {
        (Some(lo), Some(hi)) => {
            let len = char_len(t);
            len >= lo && len <= hi
        }
        _ => false,
    })
}

fn equal(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| ctx.arg(0).is_some_and(|expected| same_text(v, expected)))
}

fn different(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| ctx.arg(0).is_some_and(|other| !same_text(v, other)))
}

/// The other field's value, or `None` if no column was named. The inner
/// `Option` is absent when the named field is not in the record.
fn column<'a>(ctx: &RuleContext<'a>) -> Option<Option<&'a Value>> {
    ctx.arg(0).map(|name| ctx.record.get(&to_string(name)))
}

fn equal_with_column(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| match column(ctx) {
        Some(Some(other)) => same_text(v, other),
        _ => false,
    })
}

fn different_with_column(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| match column(ctx) {
        Some(Some(other)) => !same_text(v, other),
        Some(None) => true,
        None => false,
    })
}

fn is_in(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| ctx.args.iter().any(|a| same_text(v, a)))
}

fn not_in(ctx: &RuleContext<'_>) -> bool {
    present(ctx, |v| ctx.args.iter().all(|a| !same_text(v, a)))
}

fn compare_times(ctx: &RuleContext<'_>, before: bool) -> bool {
    present(ctx, |v| {
        let reference = ctx.arg(0).and_then(|a| to_timestamp(a).ok());
        match (to_timestamp(v).ok(), reference) {
            (Some(t), Some(r)) if before => t < r,
            (Some(t), Some(r)) => t > r,
            _ => false,
        }
    })
}

fn time_before(ctx: &RuleContext<'_>) -> bool {
    compare_times(ctx, true)
}

fn time_after(ctx: &RuleContext<'_>) -> bool {
    compare_times(ctx, false)
}

fn regexp(ctx: &RuleContext<'_>) -> bool {
    with_text(ctx, |text| {
        let Some(source) = ctx.arg(0).map(to_string) else {
            return false;
        };
        match PatternCache::global().get_or_compile(&anchored(&source)) {
            Ok(regex) => regex.is_match(text),
            Err(e) => {
                tracing::warn!(field = ctx.field, error = %e, "Invalid regexp rule pattern");
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::value::Record;
    use chrono::{TimeZone, Utc};
    use fieldcheck_patterns::PatternLibrary;

    fn check(kind: RuleKind, record: &Record, field: &str, args: &[Value]) -> bool {
        let ctx = RuleContext {
            record,
            field,
            args,
            patterns: PatternLibrary::global(),
        };
        for_kind(&kind)(&ctx)
    }

    fn one(kind: RuleKind, value: impl Into<Value>, args: &[Value]) -> bool {
        let rec = record! { "f" => value };
        check(kind, &rec, "f", args)
    }

    #[test]
    fn absent_fields_pass_everything_but_required() {
        let rec = Record::new();
        let args = [Value::Int(1), Value::Int(2)];
        for kind in RuleKind::BUILTIN {
            let expected = kind != RuleKind::Required;
            assert_eq!(check(kind.clone(), &rec, "missing", &args), expected, "{kind}");
        }
    }

    #[test]
    fn required_accepts_null() {
        assert!(one(RuleKind::Required, Value::Null, &[]));
    }

    #[test]
    fn boolean_uses_rendered_text() {
        assert!(one(RuleKind::Bool, true, &[]));
        assert!(one(RuleKind::Bool, 0, &[]));
        assert!(one(RuleKind::Bool, "True", &[]));
        assert!(!one(RuleKind::Bool, "yes", &[]));
        assert!(!one(RuleKind::Bool, 2, &[]));
    }

    #[test]
    fn between_is_inclusive() {
        let args = [Value::Int(-1), Value::Int(1)];
        assert!(one(RuleKind::Between, -1, &args));
        assert!(one(RuleKind::Between, 1, &args));
        assert!(one(RuleKind::Between, "0.5", &args));
        assert!(!one(RuleKind::Between, 2, &args));
        assert!(!one(RuleKind::Between, "aa", &args));
        assert!(!one(RuleKind::Between, 0, &args[..1]));
    }

    #[test]
    fn max_and_min() {
        assert!(one(RuleKind::Max, 10, &[Value::Int(10)]));
        assert!(!one(RuleKind::Max, 10.5, &[Value::Int(10)]));
        assert!(one(RuleKind::Min, "3", &[Value::Float(2.5)]));
        assert!(!one(RuleKind::Min, 2, &[Value::Float(2.5)]));
        assert!(!one(RuleKind::Min, 2, &[]));
    }

    #[test]
    fn length_counts_characters() {
        assert!(one(RuleKind::Length, "héllo", &[Value::UInt(5)]));
        assert!(!one(RuleKind::Length, "héllo", &[Value::UInt(6)]));
        assert!(one(RuleKind::Length, 1234, &[Value::UInt(4)]));
        assert!(one(RuleKind::LengthMin, "日本語", &[Value::UInt(3)]));
        assert!(!one(RuleKind::LengthMax, "日本語", &[Value::UInt(2)]));
        let range = [Value::UInt(2), Value::UInt(4)];
        assert!(one(RuleKind::BetweenLen, "abcd", &range));
        assert!(!one(RuleKind::BetweenLen, "abcde", &range));
        assert!(!one(RuleKind::Length, "abc", &[Value::from("x")]));
    }

    #[test]
    fn equality_compares_rendered_text() {
        assert!(one(RuleKind::Equal, 5, &[Value::from("5")]));
        assert!(!one(RuleKind::Equal, 5, &[Value::from("5.0")]));
        assert!(one(RuleKind::Different, "a", &[Value::from("b")]));
        assert!(!one(RuleKind::Different, "a", &[Value::from("a")]));
        assert!(!one(RuleKind::Equal, "a", &[]));
    }

    #[test]
    fn column_comparisons_read_the_other_field() {
        let rec = record! {
            "password" => "hunter22",
            "confirm" => "hunter22",
            "other" => "nope",
        };
        let col = |name: &str| [Value::from(name)];
        assert!(check(RuleKind::EqualWithColumn, &rec, "confirm", &col("password")));
        assert!(!check(RuleKind::EqualWithColumn, &rec, "other", &col("password")));
        assert!(!check(RuleKind::EqualWithColumn, &rec, "confirm", &col("ghost")));
        assert!(check(RuleKind::DifferentWithColumn, &rec, "other", &col("password")));
        assert!(!check(RuleKind::DifferentWithColumn, &rec, "confirm", &col("password")));
        assert!(check(RuleKind::DifferentWithColumn, &rec, "confirm", &col("ghost")));
    }

    #[test]
    fn membership() {
        let set = [Value::from("red"), Value::from("green"), Value::Int(3)];
        assert!(one(RuleKind::In, "green", &set));
        assert!(one(RuleKind::In, "3", &set));
        assert!(!one(RuleKind::In, "blue", &set));
        assert!(!one(RuleKind::In, "blue", &[]));
        assert!(one(RuleKind::NotIn, "blue", &set));
        assert!(!one(RuleKind::NotIn, "red", &set));
        assert!(one(RuleKind::NotIn, "red", &[]));
    }

    #[test]
    fn time_comparisons_are_strict() {
        let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let reference = [Value::from(noon)];
        assert!(one(RuleKind::TimeBefore, "2024-06-01T11:59:59Z", &reference));
        assert!(!one(RuleKind::TimeBefore, noon, &reference));
        assert!(one(RuleKind::TimeAfter, noon.timestamp() + 1, &reference));
        assert!(!one(RuleKind::TimeAfter, noon, &reference));
        assert!(!one(RuleKind::TimeAfter, "tomorrow", &reference));
        assert!(!one(RuleKind::TimeBefore, noon, &[Value::Bool(true)]));
    }

    #[test]
    fn regexp_is_a_full_match() {
        let pat = [Value::from("[a-z]+")];
        assert!(one(RuleKind::Regexp, "abc", &pat));
        assert!(!one(RuleKind::Regexp, "abc1", &pat));
        assert!(!one(RuleKind::Regexp, "abc", &[Value::from("(")]));
        assert!(!one(RuleKind::Regexp, "abc", &[]));
    }

    #[test]
    fn null_fails_format_and_length_rules() {
        for kind in [
            RuleKind::Alpha,
            RuleKind::AlphaNumeric,
            RuleKind::AlphaDash,
            RuleKind::Username,
            RuleKind::Host,
            RuleKind::DnsName,
            RuleKind::Ascii,
            RuleKind::Base64,
            RuleKind::Float,
            RuleKind::Bool,
        ] {
            assert!(!one(kind.clone(), Value::Null, &[]), "{kind}");
        }
        assert!(!one(RuleKind::Length, Value::Null, &[Value::UInt(4)]));
        assert!(!one(RuleKind::LengthMax, Value::Null, &[Value::UInt(10)]));
        assert!(!one(RuleKind::Regexp, Value::Null, &[Value::from("n.*")]));
    }

    #[test]
    fn null_compares_only_with_null() {
        assert!(!one(RuleKind::Equal, Value::Null, &[Value::from("null")]));
        assert!(one(RuleKind::Equal, Value::Null, &[Value::Null]));
        assert!(one(RuleKind::Different, Value::Null, &[Value::from("null")]));
        assert!(!one(RuleKind::In, Value::Null, &[Value::from("null")]));
        assert!(one(RuleKind::NotIn, Value::Null, &[Value::from("null")]));

        let rec = record! { "a" => Value::Null, "b" => "null" };
        let col = [Value::from("b")];
        assert!(!check(RuleKind::EqualWithColumn, &rec, "a", &col));
        assert!(check(RuleKind::DifferentWithColumn, &rec, "a", &col));
    }

    #[test]
    fn named_patterns() {
        assert!(one(RuleKind::Alpha, "abc", &[]));
        assert!(!one(RuleKind::Alpha, "ab1", &[]));
        assert!(one(RuleKind::AlphaDash, "a_b-1", &[]));
        assert!(one(RuleKind::Integer, -12, &[]));
        assert!(!one(RuleKind::Integer, "012", &[]));
        assert!(one(RuleKind::Float, 1.5, &[]));
        assert!(one(RuleKind::Email, "ada@example.com", &[]));
        assert!(one(RuleKind::Ip, "10.0.0.1", &[]));
        assert!(one(RuleKind::Money, "12.50", &[]));
        assert!(!one(RuleKind::Money, "12.505", &[]));
        assert!(one(RuleKind::HexColor, "#fff", &[]));
        assert!(one(RuleKind::Url, "https://example.com/a?b=c", &[]));
        assert!(!one(RuleKind::Numeric, Value::Null, &[]));
    }

    #[test]
    fn patterns_come_from_the_context_library() {
        let library = PatternLibrary::builtin()
            .with_pattern("alpha", "^[a-z]+$")
            .unwrap();
        let rec = record! { "f" => "ABC" };
        let ctx = RuleContext {
            record: &rec,
            field: "f",
            args: &[],
            patterns: &library,
        };
        assert!(!for_kind(&RuleKind::Alpha)(&ctx));
    }
}
