//! # filtra
//!
//! Fluent condition chains that build composable query predicates.
//!
//! This crate provides:
//! - A chainable builder ([`Condition`]) that turns a sequence of
//!   declarations (`eq`, `gt`, `is_in`, `between`, ...) into one
//!   [`Predicate`] tree
//! - Sticky boolean connectors: [`and()`](Condition::and) /
//!   [`or()`](Condition::or) switch the running mode for every merge that
//!   follows, not just the next one
//! - Nested groups via closures ([`and_group`](Condition::and_group) /
//!   [`or_group`](Condition::or_group))
//! - A typed variant ([`TypedCondition`]) keyed by compile-time column
//!   references ([`Col`], declared with the [`columns!`] macro)
//! - SQL rendering with positional placeholders ([`Predicate::to_sql`]) and
//!   in-memory evaluation ([`Predicate::matches`]) against a [`MemoryStore`]
//!
//! ## Chains
//!
//! Every declaration merges a leaf into the accumulated predicate under the
//! current running mode. Null values are skipped silently, so optional
//! request parameters can be passed straight through:
//!
//! ```rust
//! use filtra::Conditions;
//!
//! # fn main() -> filtra::ConditionResult<()> {
//! let realname: Option<&str> = None;
//!
//! let spec = Conditions::query()
//!     .eq("id", 1)?
//!     .or()
//!     .eq("username", "lisi")?
//!     .eq("realname", realname)?  // null: no-op
//!     .to_spec();
//! # let _ = spec;
//! # Ok(())
//! # }
//! ```
//!
//! ## Groups
//!
//! A group runs a closure against a fresh child chain, then merges the
//! child's predicate as one unit with the group's own connector; the running
//! mode is not affected:
//!
//! ```rust
//! use filtra::Conditions;
//!
//! # fn main() -> filtra::ConditionResult<()> {
//! // id = 1 OR (username = 'lisi' AND realname = '李四')
//! let spec = Conditions::query()
//!     .eq("id", 1)?
//!     .or_group(|g| g.eq("username", "lisi")?.eq("realname", "李四"))?
//!     .to_spec();
//! # let _ = spec;
//! # Ok(())
//! # }
//! ```
//!
//! ## Typed chains
//!
//! ```rust
//! use filtra::{columns, Conditions};
//!
//! struct User;
//!
//! columns!(User {
//!     ID => "id",
//!     USERNAME => "username",
//! });
//!
//! # fn main() -> filtra::ConditionResult<()> {
//! let spec = Conditions::typed::<User>()
//!     .eq(User::ID, 1)?
//!     .or()
//!     .eq(User::USERNAME, "lisi")?
//!     .to_spec();
//! # let _ = spec;
//! # Ok(())
//! # }
//! ```
//!
//! ## Running predicates
//!
//! ```rust
//! use filtra::{record, Conditions, MemoryStore};
//!
//! # fn main() -> filtra::ConditionResult<()> {
//! let mut store = MemoryStore::new();
//! store.insert(record! { "id" => 1, "username" => "zhangsan" });
//! store.insert(record! { "id" => 2, "username" => "lisi" });
//!
//! let spec = Conditions::query().right_like("username", "li")?.to_spec();
//! assert_eq!(store.count(&spec), 1);
//!
//! let (sql, params) = spec.to_sql(0);
//! assert_eq!(sql, "username LIKE $1");
//! # let _ = params;
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod condition;
pub mod error;
pub mod eval;
pub mod factory;
pub mod predicate;
pub mod store;
pub mod typed;
pub mod value;

pub use column::{Col, resolve_accessor};
pub use condition::{BoolMode, Condition, Conditions};
pub use error::{ConditionError, ConditionResult};
pub use eval::Record;
pub use factory::Op;
pub use predicate::Predicate;
pub use store::MemoryStore;
pub use typed::TypedCondition;
pub use value::Value;

// Re-exported for the `record!` macro expansion.
pub use smol_str::SmolStr;
