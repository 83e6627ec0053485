//! Error types for condition building.
//!
//! The chain builder has a deliberately small error surface: every failure is
//! a caller-usage error raised synchronously at the offending call. There is
//! no deferred validation at [`to_spec`](crate::Condition::to_spec) time and
//! no retry story, because nothing here is transient.
//!
//! ```rust
//! use filtra::{Condition, ConditionError};
//!
//! let err = Condition::new().is_in("id", Vec::<i64>::new()).unwrap_err();
//! assert!(matches!(err, ConditionError::InvalidArgument { .. }));
//! ```

use thiserror::Error;

/// Result type for condition-building operations.
pub type ConditionResult<T> = Result<T, ConditionError>;

/// Errors raised while building a condition chain.
#[derive(Debug, Error)]
pub enum ConditionError {
    /// A caller supplied an unusable argument: an empty field name, or an
    /// empty (or all-null) collection for a membership test.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable description of the offending argument.
        message: String,
    },

    /// A typed column reference could not be resolved to a field name.
    #[error("column resolution failed: {message}")]
    Resolution {
        /// Human-readable description of the failure.
        message: String,
        /// The underlying cause, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConditionError {
    /// Create an [`ConditionError::InvalidArgument`] with the given message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a [`ConditionError::Resolution`] with the given message.
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
            source: None,
        }
    }

    /// Create a [`ConditionError::Resolution`] wrapping an underlying cause.
    pub fn resolution_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Resolution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
