//! The fluent chain builder and its boolean operator state machine.
//!
//! A [`Condition`] accumulates a [`Predicate`] across chained calls. Two
//! fields make up its entire state: the accumulated predicate (starting at
//! the neutral [`Predicate::Always`]) and the current [`BoolMode`] (starting
//! at AND). Every leaf call merges its predicate into the accumulator using
//! the mode in effect *at that moment*; switching the mode never rewrites
//! what was already merged.
//!
//! ```rust
//! use filtra::Condition;
//!
//! # fn main() -> filtra::ConditionResult<()> {
//! // id = 1 OR id = 2; the bare or() flips the mode for subsequent merges.
//! let spec = Condition::new()
//!     .eq("id", 1)?
//!     .or()
//!     .eq("id", 2)?
//!     .to_spec();
//! # let _ = spec;
//! # Ok(())
//! # }
//! ```
//!
//! Nested groups are built by an independent child chain and merged as one
//! unit:
//!
//! ```rust
//! use filtra::Condition;
//!
//! # fn main() -> filtra::ConditionResult<()> {
//! // id = 2 AND (username = 'lisi' OR username = 'wangwu')
//! let spec = Condition::new()
//!     .eq("id", 2)?
//!     .and_group(|g| g.eq("username", "lisi")?.or().eq("username", "wangwu"))?
//!     .to_spec();
//! # let _ = spec;
//! # Ok(())
//! # }
//! ```

use crate::error::{ConditionError, ConditionResult};
use crate::factory::{self, Op};
use crate::predicate::Predicate;
use crate::typed::TypedCondition;
use crate::value::Value;
use tracing::trace;

/// The boolean combinator applied to the *next* merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolMode {
    /// Merge the next predicate with AND.
    #[default]
    And,
    /// Merge the next predicate with OR.
    Or,
}

/// A fluent, string-keyed condition chain.
///
/// Methods mutate the builder in place and return it for chaining; fallible
/// ones return a `Result` so usage errors surface at the offending call, not
/// at [`to_spec`](Self::to_spec) time. The builder stays usable after
/// `to_spec()`; there is no finalization lock.
#[derive(Debug, Clone, Default)]
pub struct Condition {
    predicate: Predicate,
    mode: BoolMode,
}

impl Condition {
    /// Create an empty chain: neutral predicate, AND mode.
    pub fn new() -> Self {
        Self {
            predicate: Predicate::Always,
            mode: BoolMode::And,
        }
    }

    /// Merge `next` into the accumulator under `mode`. `None` is a no-op.
    fn merge(&mut self, next: Option<Predicate>, mode: BoolMode) {
        if let Some(next) = next {
            trace!(?mode, "merging predicate into chain");
            let accumulated = std::mem::take(&mut self.predicate);
            self.predicate = match mode {
                BoolMode::And => accumulated.and_then(next),
                BoolMode::Or => accumulated.or_else(next),
            };
        }
    }

    /// Merge a nested group's predicate with a fixed operator. The running
    /// mode is left untouched.
    pub(crate) fn merge_group(&mut self, nested: Predicate, mode: BoolMode) {
        self.merge(Some(nested), mode);
    }

    fn apply(&mut self, op: Op, field: &str, value: Value) -> ConditionResult<&mut Self> {
        let leaf = factory::create(op, field, value)?;
        let mode = self.mode;
        self.merge(leaf, mode);
        Ok(self)
    }

    /// `field = value`. A null value makes this call a silent no-op.
    pub fn eq(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::Equal, field.as_ref(), value.into())
    }

    /// `field != value`. A null value makes this call a silent no-op.
    pub fn not_eq(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::NotEqual, field.as_ref(), value.into())
    }

    /// `field > value`.
    pub fn gt(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::Gt, field.as_ref(), value.into())
    }

    /// `field >= value`.
    pub fn ge(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::Ge, field.as_ref(), value.into())
    }

    /// `field < value`.
    pub fn lt(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::Lt, field.as_ref(), value.into())
    }

    /// `field <= value`.
    pub fn le(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::Le, field.as_ref(), value.into())
    }

    /// Substring match: `field LIKE '%value%'`.
    pub fn all_like(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::AllLike, field.as_ref(), value.into())
    }

    /// Suffix match: `field LIKE '%value'`.
    pub fn left_like(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::LeftLike, field.as_ref(), value.into())
    }

    /// Prefix match: `field LIKE 'value%'`.
    pub fn right_like(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.apply(Op::RightLike, field.as_ref(), value.into())
    }

    /// `field IS NULL`.
    pub fn is_null(&mut self, field: impl AsRef<str>) -> ConditionResult<&mut Self> {
        self.apply(Op::IsNull, field.as_ref(), Value::Null)
    }

    /// `field IS NOT NULL`.
    pub fn is_not_null(&mut self, field: impl AsRef<str>) -> ConditionResult<&mut Self> {
        self.apply(Op::IsNotNull, field.as_ref(), Value::Null)
    }

    /// `field IN (values...)`.
    ///
    /// Null members are dropped before the membership test. An empty
    /// collection, or one containing only nulls, is a usage error and fails
    /// with [`ConditionError::InvalidArgument`] before any state change.
    pub fn is_in<I, V>(&mut self, field: impl AsRef<str>, values: I) -> ConditionResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = collect_members(values)?;
        self.apply(Op::In, field.as_ref(), Value::List(values))
    }

    /// `field NOT IN (values...)`. Same emptiness rules as [`is_in`](Self::is_in).
    pub fn not_in<I, V>(&mut self, field: impl AsRef<str>, values: I) -> ConditionResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = collect_members(values)?;
        self.apply(Op::NotIn, field.as_ref(), Value::List(values))
    }

    /// `field BETWEEN low AND high`, inclusive on both ends.
    ///
    /// A null bound leaves that side unconstrained; when both bounds are null
    /// the call is a silent no-op and the mode is left untouched.
    pub fn between(
        &mut self,
        field: impl AsRef<str>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> ConditionResult<&mut Self> {
        self.range(Op::Between, field.as_ref(), low.into(), high.into())
    }

    /// `field NOT BETWEEN low AND high`. Same bound rules as [`between`](Self::between).
    pub fn not_between(
        &mut self,
        field: impl AsRef<str>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> ConditionResult<&mut Self> {
        self.range(Op::NotBetween, field.as_ref(), low.into(), high.into())
    }

    fn range(&mut self, op: Op, field: &str, low: Value, high: Value) -> ConditionResult<&mut Self> {
        if low.is_null() && high.is_null() {
            return Ok(self);
        }
        self.apply(op, field, Value::List(vec![low, high]))
    }

    /// Switch the running mode to AND for all subsequent merges.
    pub fn and(&mut self) -> &mut Self {
        self.merge(None, BoolMode::And);
        self.mode = BoolMode::And;
        self
    }

    /// Switch the running mode to OR for all subsequent merges.
    ///
    /// The mode is sticky: it applies until changed again. Trailing `or()`
    /// calls with nothing after them have no observable effect.
    pub fn or(&mut self) -> &mut Self {
        self.merge(None, BoolMode::Or);
        self.mode = BoolMode::Or;
        self
    }

    /// Build a nested group with a fresh child chain and AND it into the
    /// accumulator, regardless of the running mode. The running mode itself
    /// is not changed; only [`and()`](Self::and) / [`or()`](Self::or) do that.
    ///
    /// The child chain starts with its own independent state (neutral
    /// predicate, AND mode).
    pub fn and_group<F>(&mut self, f: F) -> ConditionResult<&mut Self>
    where
        F: FnOnce(&mut Condition) -> ConditionResult<&mut Condition>,
    {
        let mut child = Condition::new();
        f(&mut child)?;
        self.merge_group(child.predicate, BoolMode::And);
        Ok(self)
    }

    /// Build a nested group with a fresh child chain and OR it into the
    /// accumulator, leaving the running mode untouched.
    ///
    /// Only the merge into the parent differs from [`and_group`](Self::and_group);
    /// the child chain itself always starts at AND.
    pub fn or_group<F>(&mut self, f: F) -> ConditionResult<&mut Self>
    where
        F: FnOnce(&mut Condition) -> ConditionResult<&mut Condition>,
    {
        let mut child = Condition::new();
        f(&mut child)?;
        self.merge_group(child.predicate, BoolMode::Or);
        Ok(self)
    }

    /// The current running mode.
    pub fn mode(&self) -> BoolMode {
        self.mode
    }

    /// Terminal call: a clone of the accumulated predicate.
    ///
    /// Idempotent and callable any number of times; the builder keeps
    /// accepting calls afterwards.
    pub fn to_spec(&self) -> Predicate {
        self.predicate.clone()
    }

    /// Alias for [`to_spec`](Self::to_spec).
    pub fn build(&self) -> Predicate {
        self.to_spec()
    }

    /// Consume the builder and return the accumulated predicate without
    /// cloning.
    pub fn into_spec(self) -> Predicate {
        self.predicate
    }
}

fn collect_members<I, V>(values: I) -> ConditionResult<Vec<Value>>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(ConditionError::invalid_argument("array must not be empty"));
    }
    if values.iter().all(Value::is_null) {
        return Err(ConditionError::invalid_argument(
            "collection must contain at least one non-null value",
        ));
    }
    Ok(values)
}

/// Entry points for new condition chains.
pub struct Conditions;

impl Conditions {
    /// Start a string-keyed chain.
    pub fn query() -> Condition {
        Condition::new()
    }

    /// Start a typed chain for entity `E`; fields are passed as
    /// [`Col<E>`](crate::Col) references.
    pub fn typed<E>() -> TypedCondition<E> {
        TypedCondition::new()
    }
}
