#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./src/migrations");

// Tracing target constants for consistent logging.

/// Tracing target for client-related operations.
pub const TRACING_TARGET_CLIENT: &str = "warden_postgres::client";

/// Tracing target for account queries.
pub const TRACING_TARGET_QUERY: &str = "warden_postgres::queries";

/// Tracing target for schema migrations.
pub const TRACING_TARGET_MIGRATION: &str = "warden_postgres::migrations";

/// Tracing target for pool and connection lifecycle events.
pub const TRACING_TARGET_CONNECTION: &str = "warden_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;
pub mod types;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::{DatabaseErrorKind, Error};
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{
    ConnectionPool, MigrationResult, PgClient, PgClientExt, PgConfig, PgConn, PgPoolStatus,
    PooledConnection, run_pending_migrations,
};
use crate::types::ConstraintViolation;

pub mod error {
    //! Error types and utilities for database operations.
    //!
    //! See [`PgError`] for the main error type used throughout this crate.
    //!
    //! [`PgError`]: crate::PgError

    /// Type-erased error type for dynamic error handling.
    pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

    use std::borrow::Cow;

    pub use deadpool::managed::TimeoutType;
    pub use diesel::result::{ConnectionError as DieselConnectionError, Error as DieselError};
    pub use diesel_async::pooled_connection::PoolError as DieselPoolError;
    pub use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

    /// Provides contextual hints for error types to aid in debugging.
    pub trait ErrorHint {
        /// Returns an additional hint for an error type.
        fn hint(&self) -> Cow<'static, str>;
    }

    impl ErrorHint for TimeoutType {
        fn hint(&self) -> Cow<'static, str> {
            match self {
                TimeoutType::Wait => Cow::Borrowed(
                    "Connection pool is exhausted, consider increasing POSTGRES_MAX_CONNECTIONS",
                ),
                TimeoutType::Create => Cow::Borrowed(
                    "Unable to open a new database connection, check POSTGRES_URL and database availability",
                ),
                TimeoutType::Recycle => Cow::Borrowed(
                    "Failed to recycle a pooled connection, it may be in an invalid state",
                ),
            }
        }
    }
}

/// Error type for all PostgreSQL operations of the account store.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Waiting for, creating or recycling a pooled connection timed out.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// Failed to establish or maintain a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Applying embedded migrations failed.
    #[error("Database migration error: {0}")]
    Migration(error::BoxError),

    /// Query execution failed, including constraint violations.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// Anything not covered by the other variants.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Extracts the constraint name from a constraint violation error.
    ///
    /// # Returns
    ///
    /// - `Some(constraint_name)` if this error represents a constraint violation
    /// - `None` if this error is not related to a constraint violation
    pub fn constraint(&self) -> Option<&str> {
        let PgError::Query(err) = self else {
            return None;
        };

        let Error::DatabaseError(_, err) = err else {
            return None;
        };

        err.constraint_name()
    }

    /// Returns a structured constraint violation if this error represents one.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        self.constraint().and_then(ConstraintViolation::new)
    }

    /// Returns `true` if the database rejected the statement because of a
    /// unique index, whether or not the index name is known to this crate.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            PgError::Query(Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
        )
    }

    /// Returns `true` if the write collided with an existing row.
    ///
    /// A named constraint known to this crate decides by its category, so a
    /// known check constraint is never reported as a collision. Unnamed or
    /// unknown constraints fall back to the database error kind.
    pub fn is_uniqueness_conflict(&self) -> bool {
        match self.constraint_violation() {
            Some(violation) => violation.is_uniqueness(),
            None => self.is_unique_violation(),
        }
    }

    /// Returns whether this error indicates a transient failure that might
    /// succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PgError::Timeout(_) | PgError::Connection(ConnectionError::BadConnection(_))
        )
    }
}

impl From<error::DeadpoolError> for PgError {
    fn from(value: error::DeadpoolError) -> Self {
        use error::{DeadpoolError, DieselPoolError};

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONNECTION,
                    error = %err,
                    "post-create hook rejected a connection"
                );
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                tracing::error!(
                    target: TRACING_TARGET_CONNECTION,
                    "no tokio runtime specified for connection pool"
                );
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "Connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use deadpool::managed::TimeoutType;
    use diesel::result::DatabaseErrorInformation;

    use super::error::ErrorHint;
    use super::*;
    use crate::types::AccountConstraints;

    #[derive(Debug)]
    struct Rejection(Option<&'static str>);

    impl DatabaseErrorInformation for Rejection {
        fn message(&self) -> &str {
            "statement rejected"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("accounts")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.0
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn rejected(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> PgError {
        PgError::Query(Error::DatabaseError(kind, Box::new(Rejection(constraint))))
    }

    #[test]
    fn timeouts_are_transient() {
        let error = PgError::Timeout(TimeoutType::Wait);
        assert!(error.is_transient());
        assert!(error.constraint().is_none());
        assert!(!error.is_unique_violation());
        assert!(!error.is_uniqueness_conflict());
    }

    #[test]
    fn query_errors_are_not_transient() {
        let error = PgError::Query(Error::NotFound);
        assert!(!error.is_transient());
        assert!(error.constraint_violation().is_none());
        assert!(!error.is_uniqueness_conflict());
    }

    #[test]
    fn unique_indexes_are_conflicts() {
        for index in ["accounts_username_unique_idx", "accounts_email_address_unique_idx"] {
            let error = rejected(DatabaseErrorKind::UniqueViolation, Some(index));
            assert_eq!(error.constraint(), Some(index));
            assert!(error.constraint_violation().is_some_and(|v| v.is_uniqueness()));
            assert!(error.is_uniqueness_conflict());
        }
    }

    #[test]
    fn check_constraints_are_not_conflicts() {
        let error = rejected(
            DatabaseErrorKind::CheckViolation,
            Some("accounts_email_address_format"),
        );
        assert_eq!(
            error.constraint_violation(),
            Some(ConstraintViolation::Account(
                AccountConstraints::EmailAddressFormat
            ))
        );
        assert!(!error.is_uniqueness_conflict());
    }

    #[test]
    fn unknown_unique_indexes_fall_back_to_error_kind() {
        let unnamed = rejected(DatabaseErrorKind::UniqueViolation, None);
        assert!(unnamed.is_uniqueness_conflict());

        let unknown = rejected(DatabaseErrorKind::UniqueViolation, Some("accounts_pkey"));
        assert!(unknown.constraint_violation().is_none());
        assert!(unknown.is_uniqueness_conflict());

        let foreign = rejected(DatabaseErrorKind::ForeignKeyViolation, Some("accounts_fkey"));
        assert!(!foreign.is_uniqueness_conflict());
    }

    #[test]
    fn timeout_hints_mention_settings() {
        assert!(TimeoutType::Wait.hint().contains("POSTGRES_MAX_CONNECTIONS"));
        assert!(TimeoutType::Create.hint().contains("POSTGRES_URL"));
    }
}
