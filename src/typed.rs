//! The typed chain builder.
//!
//! [`TypedCondition`] offers the same fluent surface as
//! [`Condition`](crate::Condition), but field arguments are [`Col<E>`]
//! references bound to the entity type, so a chain for one entity cannot
//! accidentally use another entity's columns. It is a plain wrapper over the
//! string-keyed builder: no inheritance hierarchy, just delegation after
//! resolving the column name.

use crate::column::Col;
use crate::condition::{BoolMode, Condition};
use crate::error::ConditionResult;
use crate::predicate::Predicate;
use crate::value::Value;
use std::fmt;
use std::marker::PhantomData;

/// A fluent condition chain keyed by typed column references.
pub struct TypedCondition<E> {
    inner: Condition,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for TypedCondition<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for TypedCondition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCondition")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<E> Default for TypedCondition<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TypedCondition<E> {
    /// Create an empty chain: neutral predicate, AND mode.
    pub fn new() -> Self {
        Self {
            inner: Condition::new(),
            _entity: PhantomData,
        }
    }

    /// `column = value`. A null value makes this call a silent no-op.
    pub fn eq(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.eq(column.name(), value)?;
        Ok(self)
    }

    /// `column != value`. A null value makes this call a silent no-op.
    pub fn not_eq(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.not_eq(column.name(), value)?;
        Ok(self)
    }

    /// `column > value`.
    pub fn gt(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.gt(column.name(), value)?;
        Ok(self)
    }

    /// `column >= value`.
    pub fn ge(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.ge(column.name(), value)?;
        Ok(self)
    }

    /// `column < value`.
    pub fn lt(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.lt(column.name(), value)?;
        Ok(self)
    }

    /// `column <= value`.
    pub fn le(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.le(column.name(), value)?;
        Ok(self)
    }

    /// Substring match: `column LIKE '%value%'`.
    pub fn all_like(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.all_like(column.name(), value)?;
        Ok(self)
    }

    /// Suffix match: `column LIKE '%value'`.
    pub fn left_like(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.left_like(column.name(), value)?;
        Ok(self)
    }

    /// Prefix match: `column LIKE 'value%'`.
    pub fn right_like(&mut self, column: Col<E>, value: impl Into<Value>) -> ConditionResult<&mut Self> {
        self.inner.right_like(column.name(), value)?;
        Ok(self)
    }

    /// `column IS NULL`.
    pub fn is_null(&mut self, column: Col<E>) -> ConditionResult<&mut Self> {
        self.inner.is_null(column.name())?;
        Ok(self)
    }

    /// `column IS NOT NULL`.
    pub fn is_not_null(&mut self, column: Col<E>) -> ConditionResult<&mut Self> {
        self.inner.is_not_null(column.name())?;
        Ok(self)
    }

    /// `column IN (values...)`. Same emptiness rules as
    /// [`Condition::is_in`].
    pub fn is_in<I, V>(&mut self, column: Col<E>, values: I) -> ConditionResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.inner.is_in(column.name(), values)?;
        Ok(self)
    }

    /// `column NOT IN (values...)`. Same emptiness rules as
    /// [`Condition::not_in`].
    pub fn not_in<I, V>(&mut self, column: Col<E>, values: I) -> ConditionResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.inner.not_in(column.name(), values)?;
        Ok(self)
    }

    /// `column BETWEEN low AND high`, inclusive. Both bounds null is a
    /// silent no-op.
    pub fn between(
        &mut self,
        column: Col<E>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> ConditionResult<&mut Self> {
        self.inner.between(column.name(), low, high)?;
        Ok(self)
    }

    /// `column NOT BETWEEN low AND high`. Both bounds null is a silent no-op.
    pub fn not_between(
        &mut self,
        column: Col<E>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> ConditionResult<&mut Self> {
        self.inner.not_between(column.name(), low, high)?;
        Ok(self)
    }

    /// Switch the running mode to AND for all subsequent merges.
    pub fn and(&mut self) -> &mut Self {
        self.inner.and();
        self
    }

    /// Switch the running mode to OR for all subsequent merges.
    pub fn or(&mut self) -> &mut Self {
        self.inner.or();
        self
    }

    /// Build a nested group with a fresh typed child chain and AND it into
    /// the accumulator. The running mode is left untouched.
    pub fn and_group<F>(&mut self, f: F) -> ConditionResult<&mut Self>
    where
        F: FnOnce(&mut TypedCondition<E>) -> ConditionResult<&mut TypedCondition<E>>,
    {
        let mut child = TypedCondition::new();
        f(&mut child)?;
        self.inner.merge_group(child.inner.into_spec(), BoolMode::And);
        Ok(self)
    }

    /// Build a nested group with a fresh typed child chain and OR it into
    /// the accumulator. The running mode is left untouched.
    pub fn or_group<F>(&mut self, f: F) -> ConditionResult<&mut Self>
    where
        F: FnOnce(&mut TypedCondition<E>) -> ConditionResult<&mut TypedCondition<E>>,
    {
        let mut child = TypedCondition::new();
        f(&mut child)?;
        self.inner.merge_group(child.inner.into_spec(), BoolMode::Or);
        Ok(self)
    }

    /// The current running mode.
    pub fn mode(&self) -> BoolMode {
        self.inner.mode()
    }

    /// Terminal call: a clone of the accumulated predicate. Idempotent.
    pub fn to_spec(&self) -> Predicate {
        self.inner.to_spec()
    }

    /// Alias for [`to_spec`](Self::to_spec).
    pub fn build(&self) -> Predicate {
        self.to_spec()
    }

    /// Consume the builder and return the accumulated predicate.
    pub fn into_spec(self) -> Predicate {
        self.inner.into_spec()
    }
}
