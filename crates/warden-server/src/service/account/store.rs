//! Account persistence behind the [`AccountStore`] trait.
//!
//! [`PgClient`] is the production store: uniqueness is enforced by the
//! unique indexes on `accounts`, so a registration that loses a race still
//! surfaces as [`AccountError::Conflict`].

use async_trait::async_trait;
use warden_postgres::query::AccountRepository;
use warden_postgres::{PgClient, PgError};

use super::{AccountError, AccountRecord, AccountResult, NewAccountRecord};
use crate::utility::tracing_targets::TRACING_TARGET_ACCOUNTS as TRACING_TARGET;

/// CRUD primitives over stored accounts.
///
/// Every error leaving an implementation names the operation that failed.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Checks whether `username` or `email` is already taken.
    ///
    /// This is an early exit for the common case only. [`insert`] must still
    /// report [`AccountError::Conflict`] on its own.
    ///
    /// [`insert`]: AccountStore::insert
    async fn exists(&self, username: &str, email: &str) -> AccountResult<bool>;

    /// Inserts a new account, failing with [`AccountError::Conflict`] if the
    /// username or email is taken.
    async fn insert(&self, account: NewAccountRecord) -> AccountResult<AccountRecord>;

    /// Returns the stored password hash, or [`AccountError::NotFound`].
    async fn find_password_hash(&self, username: &str) -> AccountResult<String>;

    /// Deletes an account. Returns whether a row was removed; a missing
    /// account is not an error.
    async fn delete(&self, username: &str) -> AccountResult<bool>;

    /// Replaces the password hash, or fails with [`AccountError::NotFound`].
    async fn update_password_hash(&self, username: &str, password_hash: &str) -> AccountResult<()>;

    /// Renames an account.
    ///
    /// Fails with [`AccountError::Conflict`] if `new_username` is taken and
    /// with [`AccountError::NotFound`] if `username` has no account.
    async fn update_username(&self, username: &str, new_username: &str) -> AccountResult<()>;

    /// Records the most recently issued session token.
    async fn update_issued_token(&self, username: &str, token: &str) -> AccountResult<()>;

    /// Lists all accounts ordered by creation time, then username.
    async fn list_all(&self) -> AccountResult<Vec<AccountRecord>>;
}

fn storage_error(operation: &'static str) -> impl FnOnce(PgError) -> AccountError {
    move |error| {
        tracing::error!(
            target: TRACING_TARGET,
            operation,
            error = %error,
            "account store operation failed"
        );

        let retryable = error.is_transient();
        AccountError::storage(operation, retryable, error)
    }
}

fn conflict_or_storage(operation: &'static str) -> impl FnOnce(PgError) -> AccountError {
    move |error| {
        if error.is_uniqueness_conflict() {
            tracing::debug!(
                target: TRACING_TARGET,
                operation,
                constraint = error.constraint().unwrap_or("unknown"),
                "unique constraint rejected write"
            );

            return AccountError::Conflict;
        }

        storage_error(operation)(error)
    }
}

fn found_or_not(affected: bool) -> AccountResult<()> {
    if affected {
        Ok(())
    } else {
        Err(AccountError::NotFound)
    }
}

#[async_trait]
impl AccountStore for PgClient {
    async fn exists(&self, username: &str, email: &str) -> AccountResult<bool> {
        const OPERATION: &str = "exists";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        conn.account_exists(username, email)
            .await
            .map_err(storage_error(OPERATION))
    }

    async fn insert(&self, account: NewAccountRecord) -> AccountResult<AccountRecord> {
        const OPERATION: &str = "insert";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        let account = conn
            .create_account(account.into())
            .await
            .map_err(conflict_or_storage(OPERATION))?;

        Ok(account.into())
    }

    async fn find_password_hash(&self, username: &str) -> AccountResult<String> {
        const OPERATION: &str = "find_password_hash";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        conn.find_password_hash(username)
            .await
            .map_err(storage_error(OPERATION))?
            .ok_or(AccountError::NotFound)
    }

    async fn delete(&self, username: &str) -> AccountResult<bool> {
        const OPERATION: &str = "delete";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        conn.delete_account(username)
            .await
            .map_err(storage_error(OPERATION))
    }

    async fn update_password_hash(&self, username: &str, password_hash: &str) -> AccountResult<()> {
        const OPERATION: &str = "update_password_hash";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        let affected = conn
            .update_password_hash(username, password_hash)
            .await
            .map_err(storage_error(OPERATION))?;

        found_or_not(affected)
    }

    async fn update_username(&self, username: &str, new_username: &str) -> AccountResult<()> {
        const OPERATION: &str = "update_username";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        let affected = conn
            .update_username(username, new_username)
            .await
            .map_err(conflict_or_storage(OPERATION))?;

        found_or_not(affected)
    }

    async fn update_issued_token(&self, username: &str, token: &str) -> AccountResult<()> {
        const OPERATION: &str = "update_issued_token";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        let affected = conn
            .update_issued_token(username, token)
            .await
            .map_err(storage_error(OPERATION))?;

        found_or_not(affected)
    }

    async fn list_all(&self) -> AccountResult<Vec<AccountRecord>> {
        const OPERATION: &str = "list_all";

        let mut conn = self.get_connection().await.map_err(storage_error(OPERATION))?;
        let accounts = conn
            .list_accounts()
            .await
            .map_err(storage_error(OPERATION))?;

        Ok(accounts.into_iter().map(AccountRecord::from).collect())
    }
}
