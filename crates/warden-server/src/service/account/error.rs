//! Typed failures of the account use cases.

use crate::BoxedError;

/// Result type alias for account operations.
pub type AccountResult<T, E = AccountError> = Result<T, E>;

/// Failure of an account store call or an account use case.
///
/// Messages are safe to show to a remote caller. Sources are not; they are
/// only logged.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// A field failed format validation.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    /// The username or email address is already taken.
    #[error("account already exists")]
    Conflict,

    /// No account matched.
    #[error("account not found")]
    NotFound,

    /// Credentials or token were rejected.
    #[error("invalid credentials")]
    Unauthorized,

    /// The persistence layer failed while running `operation`.
    #[error("storage failure during {operation}")]
    Storage {
        operation: &'static str,
        retryable: bool,
        #[source]
        source: BoxedError,
    },

    /// Hashing or signing failed.
    #[error("internal failure")]
    Internal(#[source] crate::Error),
}

impl AccountError {
    /// Creates an [`AccountError::InvalidInput`].
    #[inline]
    pub const fn invalid_input(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidInput { field, reason }
    }

    /// Wraps a persistence failure with the name of the failed operation.
    pub fn storage(
        operation: &'static str,
        retryable: bool,
        source: impl Into<BoxedError>,
    ) -> Self {
        Self::Storage {
            operation,
            retryable,
            source: source.into(),
        }
    }

    /// Returns `true` when repeating the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { retryable: true, .. })
    }
}

impl From<crate::Error> for AccountError {
    fn from(error: crate::Error) -> Self {
        Self::Internal(error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn messages_do_not_leak_sources() {
        let error = AccountError::storage(
            "insert",
            false,
            std::io::Error::other("duplicate key value violates unique constraint"),
        );

        assert_eq!(error.to_string(), "storage failure during insert");
        assert!(error.source().is_some());
        assert!(!error.is_retryable());
    }

    #[test]
    fn invalid_input_names_the_field() {
        let error = AccountError::invalid_input("username", "must be at least 3 characters");
        assert_eq!(
            error.to_string(),
            "invalid username: must be at least 3 characters"
        );
    }

    #[test]
    fn generic_messages() {
        assert_eq!(AccountError::Conflict.to_string(), "account already exists");
        assert_eq!(AccountError::Unauthorized.to_string(), "invalid credentials");
    }
}
