//! The composable predicate tree handed to the persistence layer.
//!
//! A [`Predicate`] is a boolean expression over the fields of a record. It is
//! the terminal product of a [`Condition`](crate::Condition) chain: the chain
//! builder accumulates one of these, and `to_spec()` hands it over.
//!
//! Predicates compose under AND, OR and NOT, and can be rendered to a SQL
//! `WHERE` fragment with positional placeholders or evaluated in memory
//! against a [`Record`](crate::Record).
//!
//! ```rust
//! use filtra::{Predicate, Value};
//!
//! let p = Predicate::Equals("status".into(), "active".into())
//!     .and_then(Predicate::Gt("age".into(), Value::Int(18)));
//!
//! let (sql, params) = p.to_sql(0);
//! assert_eq!(sql, "(status = $1 AND age > $2)");
//! assert_eq!(params.len(), 2);
//! ```

use crate::value::Value;
use smol_str::SmolStr;

/// A node in a boolean expression tree over record fields.
///
/// `Always` is the neutral element: it matches every record and disappears
/// when merged with anything else. A freshly created chain holds `Always`,
/// which is why `to_spec()` on an empty chain selects everything.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// No constraint (matches everything).
    Always,

    /// Equality comparison.
    Equals(SmolStr, Value),
    /// Negated equality comparison.
    NotEquals(SmolStr, Value),

    /// Less than.
    Lt(SmolStr, Value),
    /// Less than or equal.
    Lte(SmolStr, Value),
    /// Greater than.
    Gt(SmolStr, Value),
    /// Greater than or equal.
    Gte(SmolStr, Value),

    /// Membership in a list of values.
    In(SmolStr, Vec<Value>),
    /// Absence from a list of values.
    NotIn(SmolStr, Vec<Value>),

    /// Substring match (LIKE %value%).
    Contains(SmolStr, Value),
    /// Prefix match (LIKE value%).
    StartsWith(SmolStr, Value),
    /// Suffix match (LIKE %value).
    EndsWith(SmolStr, Value),

    /// Null check.
    IsNull(SmolStr),
    /// Non-null check.
    IsNotNull(SmolStr),

    /// Inclusive range test. Either bound may be `Value::Null`, in which case
    /// that side is unconstrained; the chain builder never produces a range
    /// with both bounds null.
    Between(SmolStr, Value, Value),
    /// Negated inclusive range test.
    NotBetween(SmolStr, Value, Value),

    /// Logical AND of multiple predicates.
    And(Vec<Predicate>),
    /// Logical OR of multiple predicates.
    Or(Vec<Predicate>),
    /// Logical NOT of a predicate.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Check whether this predicate is the neutral `Always`.
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Create an AND predicate from an iterator, dropping neutral members and
    /// collapsing singleton lists.
    pub fn all_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        let mut predicates: Vec<_> = predicates
            .into_iter()
            .filter(|p| !p.is_always())
            .collect();
        match predicates.len() {
            0 => Self::Always,
            1 => predicates.swap_remove(0),
            _ => Self::And(predicates),
        }
    }

    /// Create an OR predicate from an iterator, dropping neutral members and
    /// collapsing singleton lists.
    pub fn any_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        let mut predicates: Vec<_> = predicates
            .into_iter()
            .filter(|p| !p.is_always())
            .collect();
        match predicates.len() {
            0 => Self::Always,
            1 => predicates.swap_remove(0),
            _ => Self::Or(predicates),
        }
    }

    /// Negate a predicate. Negating `Always` stays `Always`; the chain
    /// builder has no way to express "never" and the neutral element must
    /// survive negation-free round trips.
    pub fn negate(predicate: Predicate) -> Self {
        if predicate.is_always() {
            return Self::Always;
        }
        Self::Not(Box::new(predicate))
    }

    /// Combine with another predicate using AND.
    ///
    /// The accumulated predicate is the left operand: the result reads
    /// `self AND other`. Merging into an existing top-level `And` appends to
    /// it instead of nesting.
    pub fn and_then(self, other: Predicate) -> Self {
        if self.is_always() {
            return other;
        }
        if other.is_always() {
            return self;
        }
        match self {
            Self::And(mut predicates) => {
                predicates.push(other);
                Self::And(predicates)
            }
            _ => Self::And(vec![self, other]),
        }
    }

    /// Combine with another predicate using OR.
    ///
    /// Same left-to-right shape as [`and_then`](Self::and_then).
    pub fn or_else(self, other: Predicate) -> Self {
        if self.is_always() {
            return other;
        }
        if other.is_always() {
            return self;
        }
        match self {
            Self::Or(mut predicates) => {
                predicates.push(other);
                Self::Or(predicates)
            }
            _ => Self::Or(vec![self, other]),
        }
    }

    /// Render this predicate as a SQL `WHERE` fragment with `$n` positional
    /// placeholders, starting after `param_offset` already-bound parameters.
    ///
    /// Returns `(sql, params)` where `params` are the values to bind in order.
    pub fn to_sql(&self, param_offset: usize) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let sql = self.write_sql(param_offset, &mut params);
        (sql, params)
    }

    fn write_sql(&self, offset: usize, params: &mut Vec<Value>) -> String {
        match self {
            Self::Always => "TRUE".to_string(),

            Self::Equals(col, val) => binary_sql(col, "=", val.clone(), offset, params),
            Self::NotEquals(col, val) => binary_sql(col, "!=", val.clone(), offset, params),
            Self::Lt(col, val) => binary_sql(col, "<", val.clone(), offset, params),
            Self::Lte(col, val) => binary_sql(col, "<=", val.clone(), offset, params),
            Self::Gt(col, val) => binary_sql(col, ">", val.clone(), offset, params),
            Self::Gte(col, val) => binary_sql(col, ">=", val.clone(), offset, params),

            Self::In(col, values) => {
                if values.is_empty() {
                    // IN over the empty set matches nothing.
                    return "FALSE".to_string();
                }
                let placeholders: Vec<_> = values
                    .iter()
                    .map(|v| push_param(v.clone(), offset, params))
                    .collect();
                format!("{} IN ({})", col, placeholders.join(", "))
            }
            Self::NotIn(col, values) => {
                if values.is_empty() {
                    // NOT IN over the empty set excludes nothing.
                    return "TRUE".to_string();
                }
                let placeholders: Vec<_> = values
                    .iter()
                    .map(|v| push_param(v.clone(), offset, params))
                    .collect();
                format!("{} NOT IN ({})", col, placeholders.join(", "))
            }

            Self::Contains(col, val) => like_sql(col, val, "%", "%", offset, params),
            Self::StartsWith(col, val) => like_sql(col, val, "", "%", offset, params),
            Self::EndsWith(col, val) => like_sql(col, val, "%", "", offset, params),

            Self::IsNull(col) => format!("{} IS NULL", col),
            Self::IsNotNull(col) => format!("{} IS NOT NULL", col),

            Self::Between(col, low, high) => match (low.is_null(), high.is_null()) {
                (false, false) => {
                    let lo = push_param(low.clone(), offset, params);
                    let hi = push_param(high.clone(), offset, params);
                    format!("{} BETWEEN {} AND {}", col, lo, hi)
                }
                (false, true) => binary_sql(col, ">=", low.clone(), offset, params),
                (true, false) => binary_sql(col, "<=", high.clone(), offset, params),
                (true, true) => "TRUE".to_string(),
            },
            Self::NotBetween(col, low, high) => match (low.is_null(), high.is_null()) {
                (false, false) => {
                    let lo = push_param(low.clone(), offset, params);
                    let hi = push_param(high.clone(), offset, params);
                    format!("{} NOT BETWEEN {} AND {}", col, lo, hi)
                }
                (false, true) => binary_sql(col, "<", low.clone(), offset, params),
                (true, false) => binary_sql(col, ">", high.clone(), offset, params),
                (true, true) => "FALSE".to_string(),
            },

            Self::And(predicates) => {
                if predicates.is_empty() {
                    return "TRUE".to_string();
                }
                let parts: Vec<_> = predicates
                    .iter()
                    .map(|p| p.write_sql(offset, params))
                    .collect();
                format!("({})", parts.join(" AND "))
            }
            Self::Or(predicates) => {
                if predicates.is_empty() {
                    return "FALSE".to_string();
                }
                let parts: Vec<_> = predicates
                    .iter()
                    .map(|p| p.write_sql(offset, params))
                    .collect();
                format!("({})", parts.join(" OR "))
            }
            Self::Not(predicate) => {
                let inner = predicate.write_sql(offset, params);
                format!("NOT ({})", inner)
            }
        }
    }
}

fn push_param(value: Value, offset: usize, params: &mut Vec<Value>) -> String {
    params.push(value);
    format!("${}", offset + params.len())
}

fn binary_sql(
    col: &str,
    op: &str,
    value: Value,
    offset: usize,
    params: &mut Vec<Value>,
) -> String {
    let placeholder = push_param(value, offset, params);
    format!("{} {} {}", col, op, placeholder)
}

fn like_sql(
    col: &str,
    value: &Value,
    before: &str,
    after: &str,
    offset: usize,
    params: &mut Vec<Value>,
) -> String {
    let wrapped = match value {
        Value::String(s) => Value::String(format!("{}{}{}", before, s, after)),
        other => other.clone(),
    };
    let placeholder = push_param(wrapped, offset, params);
    format!("{} LIKE {}", col, placeholder)
}

impl Default for Predicate {
    fn default() -> Self {
        Self::Always
    }
}
