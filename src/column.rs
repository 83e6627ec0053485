//! Typed column references and the accessor-name resolver.
//!
//! The source-language trick of turning a getter reference into a field name
//! at runtime has no general equivalent here, so typed chains use [`Col`]
//! constants instead: a zero-cost field reference bound to an entity type,
//! declared once (by hand or with the [`columns!`](crate::columns) macro) and
//! checked by the compiler at every call site.
//!
//! [`resolve_accessor`] keeps the accessor-name convention available for
//! callers that receive getter-style names from elsewhere: `getUserName`
//! resolves to `userName`, `isActive` to `active`, anything else passes
//! through verbatim.

use crate::error::{ConditionError, ConditionResult};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// A column reference bound to entity type `E`.
pub struct Col<E: ?Sized> {
    name: Cow<'static, str>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: ?Sized> Col<E> {
    /// Create a column reference from a static field name.
    pub const fn named(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _entity: PhantomData,
        }
    }

    /// Create a column reference from a getter-style accessor name.
    ///
    /// `Col::<User>::from_accessor("getRealname")` refers to the `realname`
    /// field. Fails with [`ConditionError::Resolution`] when the name cannot
    /// be resolved.
    pub fn from_accessor(accessor: &str) -> ConditionResult<Self> {
        Ok(Self {
            name: Cow::Owned(resolve_accessor(accessor)?),
            _entity: PhantomData,
        })
    }

    /// The field name this reference resolves to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<E: ?Sized> Clone for Col<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: ?Sized> fmt::Debug for Col<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Col({:?})", self.name)
    }
}

impl<E: ?Sized> fmt::Display for Col<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Resolve a getter-style accessor name to a field name.
///
/// A leading `get` or `is` prefix is stripped and the first remaining
/// character lower-cased; names without a recognized prefix (or consisting of
/// nothing but the prefix) are returned verbatim. An empty name fails with
/// [`ConditionError::Resolution`].
pub fn resolve_accessor(name: &str) -> ConditionResult<String> {
    if name.is_empty() {
        return Err(ConditionError::resolution(
            "accessor name must not be empty",
        ));
    }
    let stripped = name
        .strip_prefix("get")
        .or_else(|| name.strip_prefix("is"));
    match stripped {
        Some(rest) if !rest.is_empty() => Ok(lower_first(rest)),
        _ => Ok(name.to_string()),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Declare [`Col`] constants for an entity type.
///
/// ```rust
/// use filtra::{columns, Conditions};
///
/// struct User;
///
/// columns!(User {
///     ID => "id",
///     USERNAME => "username",
/// });
///
/// # fn main() -> filtra::ConditionResult<()> {
/// let spec = Conditions::typed::<User>()
///     .eq(User::ID, 1)?
///     .or()
///     .eq(User::USERNAME, "lisi")?
///     .to_spec();
/// # let _ = spec;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! columns {
    ($entity:ty { $($konst:ident => $name:literal),+ $(,)? }) => {
        impl $entity {
            $(
                pub const $konst: $crate::Col<$entity> = $crate::Col::named($name);
            )+
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getter_prefix_stripped() {
        assert_eq!(resolve_accessor("getUsername").unwrap(), "username");
        assert_eq!(resolve_accessor("getUserName").unwrap(), "userName");
    }

    #[test]
    fn test_boolean_prefix_stripped() {
        assert_eq!(resolve_accessor("isActive").unwrap(), "active");
    }

    #[test]
    fn test_unprefixed_passes_verbatim() {
        assert_eq!(resolve_accessor("username").unwrap(), "username");
        assert_eq!(resolve_accessor("id").unwrap(), "id");
    }

    #[test]
    fn test_bare_prefix_passes_verbatim() {
        assert_eq!(resolve_accessor("get").unwrap(), "get");
        assert_eq!(resolve_accessor("is").unwrap(), "is");
    }

    #[test]
    fn test_empty_name_fails() {
        let err = resolve_accessor("").unwrap_err();
        assert!(matches!(err, ConditionError::Resolution { .. }));
    }

    #[test]
    fn test_col_from_accessor() {
        struct User;
        let col = Col::<User>::from_accessor("getRealname").unwrap();
        assert_eq!(col.name(), "realname");
    }

    #[test]
    fn test_const_col() {
        struct User;
        const ID: Col<User> = Col::named("id");
        assert_eq!(ID.name(), "id");
    }
}
