//! Account use cases: register, login, credential changes, deletion and listing.

use std::fmt;
use std::sync::Arc;

use super::{Account, AccountError, AccountResult, AccountStore, NewAccountRecord};
use crate::service::security::{
    AuthClaims, IssuedToken, PasswordHasher, SessionTokens, TokenError,
};
use crate::utility::tracing_targets::TRACING_TARGET_ACCOUNTS as TRACING_TARGET;

/// Minimum username length in characters.
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Minimum password length in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Orchestrates validation, hashing, token issuance and the account store.
///
/// Format checks always run before any store or hash call.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    tokens: SessionTokens,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        tokens: SessionTokens,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Creates an account and returns it without secrets.
    ///
    /// A collision on either username or email is reported as the same
    /// [`AccountError::Conflict`].
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AccountResult<Account> {
        validate_username(username)?;
        validate_email(email)?;
        validate_password(password)?;

        if self.store.exists(username, email).await? {
            tracing::debug!(
                target: TRACING_TARGET,
                username,
                "registration rejected: account already exists"
            );

            return Err(AccountError::Conflict);
        }

        let password_hash = self.hasher.hash_password(password).await?;
        let record = self
            .store
            .insert(NewAccountRecord {
                username: username.to_owned(),
                email: email.to_owned(),
                password_hash,
            })
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            username = %record.username,
            "account registered"
        );

        Ok(record.into())
    }

    /// Verifies credentials, issues a session token and records it.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`AccountError::Unauthorized`] after a comparable amount of hashing work.
    pub async fn login(&self, username: &str, password: &str) -> AccountResult<IssuedToken> {
        let password_hash = match self.store.find_password_hash(username).await {
            Ok(password_hash) => password_hash,
            Err(AccountError::NotFound) => {
                self.hasher.verify_dummy_password(password).await?;
                tracing::debug!(
                    target: TRACING_TARGET,
                    username,
                    "login rejected: unknown account"
                );

                return Err(AccountError::Unauthorized);
            }
            Err(error) => return Err(error),
        };

        if !self.hasher.verify_password(password, &password_hash).await? {
            tracing::debug!(
                target: TRACING_TARGET,
                username,
                "login rejected: wrong password"
            );

            return Err(AccountError::Unauthorized);
        }

        let issued = self.tokens.issue(username)?;
        match self.store.update_issued_token(username, &issued.token).await {
            Ok(()) => {}
            Err(AccountError::NotFound) => return Err(AccountError::Unauthorized),
            Err(error) => return Err(error),
        }

        tracing::info!(
            target: TRACING_TARGET,
            username,
            token_id = %issued.claims.jti,
            "login succeeded"
        );

        Ok(issued)
    }

    /// Replaces the password after verifying the current one.
    pub async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> AccountResult<()> {
        validate_password(new_password)?;

        let password_hash = self.store.find_password_hash(username).await?;
        if !self
            .hasher
            .verify_password(current_password, &password_hash)
            .await?
        {
            tracing::debug!(
                target: TRACING_TARGET,
                username,
                "password change rejected: wrong current password"
            );

            return Err(AccountError::Unauthorized);
        }

        let new_hash = self.hasher.hash_password(new_password).await?;
        self.store.update_password_hash(username, &new_hash).await?;

        tracing::info!(target: TRACING_TARGET, username, "password changed");
        Ok(())
    }

    /// Renames an account.
    pub async fn change_username(&self, username: &str, new_username: &str) -> AccountResult<()> {
        validate_username(new_username)?;

        self.store.update_username(username, new_username).await?;

        tracing::info!(
            target: TRACING_TARGET,
            username,
            new_username,
            "username changed"
        );

        Ok(())
    }

    /// Deletes an account. Deleting a missing account succeeds.
    pub async fn delete_account(&self, username: &str) -> AccountResult<()> {
        let deleted = self.store.delete(username).await?;

        tracing::info!(
            target: TRACING_TARGET,
            username,
            deleted,
            "account deletion processed"
        );

        Ok(())
    }

    /// Lists all accounts without password hashes or tokens.
    pub async fn list_accounts(&self) -> AccountResult<Vec<Account>> {
        let records = self.store.list_all().await?;
        Ok(records.into_iter().map(Account::from).collect())
    }

    /// Checks a presented session token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<AuthClaims, TokenError> {
        self.tokens.validate(token)
    }
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService")
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl From<TokenError> for AccountError {
    fn from(_: TokenError) -> Self {
        Self::Unauthorized
    }
}

fn validate_username(username: &str) -> AccountResult<()> {
    if username.chars().count() < USERNAME_MIN_LENGTH {
        return Err(AccountError::invalid_input(
            "username",
            "must be at least 3 characters",
        ));
    }

    Ok(())
}

fn validate_email(email: &str) -> AccountResult<()> {
    if !email.contains('@') {
        return Err(AccountError::invalid_input("email", "must contain '@'"));
    }

    Ok(())
}

fn validate_password(password: &str) -> AccountResult<()> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AccountError::invalid_input(
            "password",
            "must be at least 8 characters",
        ));
    }

    Ok(())
}
