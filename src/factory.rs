//! Leaf predicate construction.
//!
//! [`create`] is the single place where a chain call (operator + field +
//! value) becomes a [`Predicate`] leaf. It is a pure function: no I/O, no
//! state. A null value with a comparison operator yields `Ok(None)`, the
//! "skip merge" sentinel the chain builder turns into a silent no-op.

use crate::error::{ConditionError, ConditionResult};
use crate::predicate::Predicate;
use crate::value::Value;

/// The comparison operators a chain call can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equality.
    Equal,
    /// Negated equality.
    NotEqual,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Substring match, wildcards on both sides.
    AllLike,
    /// Suffix match, wildcard on the left.
    LeftLike,
    /// Prefix match, wildcard on the right.
    RightLike,
    /// Membership in a collection.
    In,
    /// Absence from a collection.
    NotIn,
    /// Null check.
    IsNull,
    /// Non-null check.
    IsNotNull,
    /// Inclusive range test.
    Between,
    /// Negated inclusive range test.
    NotBetween,
}

/// Build a single leaf predicate for `field` under `op`.
///
/// Returns `Ok(None)` when `value` is null and `op` is not a null test; the
/// caller must skip the merge entirely in that case. Fails with
/// [`ConditionError::InvalidArgument`] on an empty field name or a malformed
/// value shape for the operator.
///
/// Field names may contain `.` to address nested documents; the path is
/// resolved segment by segment at evaluation time.
///
/// For `In`/`NotIn` the value must be a [`Value::List`]; null members are
/// dropped before the predicate is built. A list that becomes empty after
/// filtering still yields a predicate (matching nothing for `In`, everything
/// for `NotIn`); rejecting originally-empty input is the chain builder's
/// job, before this function is reached.
pub fn create(op: Op, field: &str, value: Value) -> ConditionResult<Option<Predicate>> {
    if field.is_empty() {
        return Err(ConditionError::invalid_argument(
            "field name must not be empty",
        ));
    }
    if value.is_null() && !matches!(op, Op::IsNull | Op::IsNotNull) {
        return Ok(None);
    }

    let field = smol_str::SmolStr::new(field);
    let predicate = match op {
        Op::Equal => Predicate::Equals(field, value),
        Op::NotEqual => Predicate::NotEquals(field, value),
        Op::Lt => Predicate::Lt(field, value),
        Op::Le => Predicate::Lte(field, value),
        Op::Gt => Predicate::Gt(field, value),
        Op::Ge => Predicate::Gte(field, value),
        Op::AllLike => Predicate::Contains(field, value),
        Op::LeftLike => Predicate::EndsWith(field, value),
        Op::RightLike => Predicate::StartsWith(field, value),
        Op::In | Op::NotIn => {
            let members = match value {
                Value::List(members) => members,
                _ => {
                    return Err(ConditionError::invalid_argument(
                        "membership test value must be a collection",
                    ));
                }
            };
            let members: Vec<_> = members.into_iter().filter(|v| !v.is_null()).collect();
            if op == Op::In {
                Predicate::In(field, members)
            } else {
                Predicate::NotIn(field, members)
            }
        }
        Op::Between | Op::NotBetween => {
            let bounds = match value {
                Value::List(bounds) => <[Value; 2]>::try_from(bounds).ok(),
                _ => None,
            };
            let Some([low, high]) = bounds else {
                return Err(ConditionError::invalid_argument(
                    "range test value must be a [low, high] pair",
                ));
            };
            if op == Op::Between {
                Predicate::Between(field, low, high)
            } else {
                Predicate::NotBetween(field, low, high)
            }
        }
        Op::IsNull => Predicate::IsNull(field),
        Op::IsNotNull => Predicate::IsNotNull(field),
    };
    Ok(Some(predicate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_rejected() {
        let err = create(Op::Equal, "", Value::Int(1)).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_null_value_is_skip_sentinel() {
        assert_eq!(create(Op::Equal, "id", Value::Null).unwrap(), None);
        assert_eq!(create(Op::Gt, "id", Value::Null).unwrap(), None);
    }

    #[test]
    fn test_null_tests_ignore_value() {
        assert!(matches!(
            create(Op::IsNull, "realname", Value::Null).unwrap(),
            Some(Predicate::IsNull(_))
        ));
        assert!(matches!(
            create(Op::IsNotNull, "realname", Value::Null).unwrap(),
            Some(Predicate::IsNotNull(_))
        ));
    }

    #[test]
    fn test_membership_filters_null_members() {
        let value = Value::List(vec![Value::Int(1), Value::Null, Value::Int(2)]);
        match create(Op::In, "id", value).unwrap() {
            Some(Predicate::In(_, members)) => {
                assert_eq!(members, vec![Value::Int(1), Value::Int(2)]);
            }
            other => panic!("expected In, got {:?}", other),
        }
    }

    #[test]
    fn test_membership_requires_collection() {
        let err = create(Op::In, "id", Value::Int(1)).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_filtered_empty_membership_still_builds() {
        let value = Value::List(vec![Value::Null]);
        match create(Op::NotIn, "id", value).unwrap() {
            Some(Predicate::NotIn(_, members)) => assert!(members.is_empty()),
            other => panic!("expected NotIn, got {:?}", other),
        }
    }

    #[test]
    fn test_between_bound_pair() {
        let value = Value::List(vec![Value::Int(1), Value::Null]);
        match create(Op::Between, "id", value).unwrap() {
            Some(Predicate::Between(_, low, high)) => {
                assert_eq!(low, Value::Int(1));
                assert_eq!(high, Value::Null);
            }
            other => panic!("expected Between, got {:?}", other),
        }
    }

    #[test]
    fn test_like_family_mapping() {
        assert!(matches!(
            create(Op::AllLike, "name", "x".into()).unwrap(),
            Some(Predicate::Contains(_, _))
        ));
        assert!(matches!(
            create(Op::LeftLike, "name", "x".into()).unwrap(),
            Some(Predicate::EndsWith(_, _))
        ));
        assert!(matches!(
            create(Op::RightLike, "name", "x".into()).unwrap(),
            Some(Predicate::StartsWith(_, _))
        ));
    }

    #[test]
    fn test_dotted_path_accepted() {
        assert!(matches!(
            create(Op::Equal, "address.city", "Oslo".into()).unwrap(),
            Some(Predicate::Equals(field, _)) if field == "address.city"
        ));
    }
}
