//! In-memory predicate evaluation over records.
//!
//! A [`Record`] is an ordered field map. [`Predicate::matches`] applies a
//! predicate tree to one record with SQL-style null semantics: a null (or
//! missing) field value fails every comparison leaf, including the negated
//! forms `NotEquals`, `NotIn` and `NotBetween`, and only the explicit null
//! checks observe it.
//!
//! Dotted field names traverse nested [`Value::Json`] documents segment by
//! segment: `"address.city"` reads the `address` field, then the `city` key
//! inside it.

use crate::predicate::Predicate;
use crate::value::Value;
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::cmp::Ordering;

/// A single record: an ordered map from field name to value.
pub type Record = IndexMap<SmolStr, Value>;

/// Build a [`Record`] from `field => value` pairs.
///
/// ```rust
/// use filtra::{record, Value};
///
/// let user = record! {
///     "id" => 1,
///     "username" => "zhangsan",
///     "realname" => Value::Null,
/// };
/// assert_eq!(user.get("username"), Some(&Value::String("zhangsan".into())));
/// ```
#[macro_export]
macro_rules! record {
    ($($field:expr => $value:expr),* $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($crate::SmolStr::new($field), $crate::Value::from($value));
        )*
        record
    }};
}

impl Predicate {
    /// Test this predicate against a record.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Always => true,

            Self::Equals(field, target) => match lookup(record, field) {
                Some(value) => value.loose_eq(target),
                None => false,
            },
            Self::NotEquals(field, target) => match lookup(record, field) {
                Some(value) if !value.is_null() => !value.loose_eq(target),
                _ => false,
            },

            Self::Lt(field, target) => ordered(record, field, target, Ordering::is_lt),
            Self::Lte(field, target) => ordered(record, field, target, Ordering::is_le),
            Self::Gt(field, target) => ordered(record, field, target, Ordering::is_gt),
            Self::Gte(field, target) => ordered(record, field, target, Ordering::is_ge),

            Self::In(field, members) => {
                if members.is_empty() {
                    return false;
                }
                match lookup(record, field) {
                    Some(value) => members.iter().any(|m| value.loose_eq(m)),
                    None => false,
                }
            }
            Self::NotIn(field, members) => {
                if members.is_empty() {
                    return true;
                }
                match lookup(record, field) {
                    Some(value) if !value.is_null() => {
                        !members.iter().any(|m| value.loose_eq(m))
                    }
                    _ => false,
                }
            }

            Self::Contains(field, pattern) => like(record, field, pattern, |v, p| v.contains(p)),
            Self::StartsWith(field, pattern) => {
                like(record, field, pattern, |v, p| v.starts_with(p))
            }
            Self::EndsWith(field, pattern) => like(record, field, pattern, |v, p| v.ends_with(p)),

            Self::IsNull(field) => match lookup(record, field) {
                Some(value) => value.is_null(),
                None => true,
            },
            Self::IsNotNull(field) => {
                matches!(lookup(record, field), Some(value) if !value.is_null())
            }

            Self::Between(field, low, high) => in_range(record, field, low, high),
            Self::NotBetween(field, low, high) => match lookup(record, field) {
                Some(value) if !value.is_null() => !in_range(record, field, low, high),
                _ => false,
            },

            Self::And(predicates) => predicates.iter().all(|p| p.matches(record)),
            Self::Or(predicates) => predicates.iter().any(|p| p.matches(record)),
            Self::Not(predicate) => !predicate.matches(record),
        }
    }
}

/// Read a (possibly dotted) field path out of a record.
fn lookup(record: &Record, path: &str) -> Option<Value> {
    match path.split_once('.') {
        None => record.get(path).cloned(),
        Some((head, rest)) => {
            let mut current = record.get(head)?.clone();
            for segment in rest.split('.') {
                current = match current {
                    Value::Json(serde_json::Value::Object(mut map)) => {
                        json_to_value(map.remove(segment)?)
                    }
                    _ => return None,
                };
            }
            Some(current)
        }
    }
}

fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        other => Value::Json(other),
    }
}

fn ordered(
    record: &Record,
    field: &str,
    target: &Value,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    match lookup(record, field) {
        Some(value) => value
            .partial_cmp_loose(target)
            .is_some_and(accept),
        None => false,
    }
}

fn like(
    record: &Record,
    field: &str,
    pattern: &Value,
    test: impl Fn(&str, &str) -> bool,
) -> bool {
    match (lookup(record, field), pattern) {
        (Some(Value::String(value)), Value::String(pattern)) => test(&value, pattern),
        _ => false,
    }
}

fn in_range(record: &Record, field: &str, low: &Value, high: &Value) -> bool {
    let value = match lookup(record, field) {
        Some(value) if !value.is_null() => value,
        _ => return false,
    };
    let above_low = low.is_null()
        || value
            .partial_cmp_loose(low)
            .is_some_and(Ordering::is_ge);
    let below_high = high.is_null()
        || value
            .partial_cmp_loose(high)
            .is_some_and(Ordering::is_le);
    above_low && below_high
}
