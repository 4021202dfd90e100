//! Account repository for managing user accounts.

use std::future::Future;

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Account, NewAccount};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for account database operations.
///
/// Uniqueness of usernames and email addresses is enforced by the unique
/// indexes on `accounts`; a violation surfaces as a [`PgError`] whose
/// [`constraint_violation`] names the index.
///
/// [`constraint_violation`]: PgError::constraint_violation
pub trait AccountRepository {
    /// Checks whether any account already uses `username` or `email_address`.
    fn account_exists(
        &mut self,
        username: &str,
        email_address: &str,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Inserts a new account row.
    fn create_account(
        &mut self,
        new_account: NewAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Returns only the stored password hash for `username`.
    fn find_password_hash(
        &mut self,
        username: &str,
    ) -> impl Future<Output = PgResult<Option<String>>> + Send;

    /// Deletes the account row. Returns `false` when no row matched.
    fn delete_account(&mut self, username: &str) -> impl Future<Output = PgResult<bool>> + Send;

    /// Replaces the password hash. Returns `false` when no row matched.
    fn update_password_hash(
        &mut self,
        username: &str,
        password_hash: &str,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Renames an account. Returns `false` when `username` has no row.
    fn update_username(
        &mut self,
        username: &str,
        new_username: &str,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Stores the most recently issued session token. Returns `false` when no row matched.
    fn update_issued_token(
        &mut self,
        username: &str,
        issued_token: &str,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists every account, oldest first.
    fn list_accounts(&mut self) -> impl Future<Output = PgResult<Vec<Account>>> + Send;
}

impl AccountRepository for PgConnection {
    async fn account_exists(&mut self, username: &str, email_address: &str) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        diesel::select(exists(
            accounts::table.filter(
                dsl::username
                    .eq(username)
                    .or(dsl::email_address.eq(email_address)),
            ),
        ))
        .get_result(self)
        .await
        .map_err(PgError::from)
    }

    async fn create_account(&mut self, new_account: NewAccount) -> PgResult<Account> {
        use schema::accounts;

        let account = diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            username = %account.username,
            "account row inserted"
        );

        Ok(account)
    }

    async fn find_password_hash(&mut self, username: &str) -> PgResult<Option<String>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::username.eq(username))
            .select(dsl::password_hash)
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_account(&mut self, username: &str) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        let affected = diesel::delete(accounts::table.filter(dsl::username.eq(username)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            username,
            affected,
            "account delete executed"
        );

        Ok(affected > 0)
    }

    async fn update_password_hash(
        &mut self,
        username: &str,
        password_hash: &str,
    ) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        let affected = diesel::update(accounts::table.filter(dsl::username.eq(username)))
            .set(dsl::password_hash.eq(password_hash))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(affected > 0)
    }

    async fn update_username(&mut self, username: &str, new_username: &str) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        let affected = diesel::update(accounts::table.filter(dsl::username.eq(username)))
            .set(dsl::username.eq(new_username))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(affected > 0)
    }

    async fn update_issued_token(&mut self, username: &str, issued_token: &str) -> PgResult<bool> {
        use schema::accounts::{self, dsl};

        let affected = diesel::update(accounts::table.filter(dsl::username.eq(username)))
            .set(dsl::issued_token.eq(Some(issued_token)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(affected > 0)
    }

    async fn list_accounts(&mut self) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .order((dsl::created_at.asc(), dsl::username.asc()))
            .select(Account::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
