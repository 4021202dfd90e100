//! Application state and dependency injection.

mod account;
mod config;
mod security;

use std::sync::Arc;

pub use crate::service::account::{
    Account, AccountError, AccountRecord, AccountResult, AccountService, AccountStore,
    MemoryAccountStore, NewAccountRecord, PASSWORD_MIN_LENGTH, USERNAME_MIN_LENGTH,
};
pub use crate::service::config::ServiceConfig;
#[cfg(test)]
pub(crate) use crate::service::security::test_session_keys;
pub use crate::service::security::{
    AuthClaims, DEFAULT_HASHER_MAX_CONCURRENCY, DEFAULT_TOKEN_TTL, IssuedToken, PasswordHasher,
    SessionKeys, SessionKeysConfig, SessionTokens, TOKEN_AUDIENCE, TOKEN_ISSUER, TokenError,
};
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub account_service: AccountService,
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
    pub session_tokens: SessionTokens,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres, applies migrations and loads the session keys.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let postgres = config.connect_postgres().await?;
        let session_keys = config.load_session_keys().await?;
        Self::with_store(config, Arc::new(postgres), session_keys)
    }

    /// Builds state over an arbitrary account store.
    pub fn with_store(
        config: &ServiceConfig,
        store: Arc<dyn AccountStore>,
        session_keys: SessionKeys,
    ) -> Result<Self> {
        let password_hasher = config.create_password_hasher()?;
        let session_tokens = config.create_session_tokens(session_keys.clone());
        let account_service =
            AccountService::new(store, password_hasher.clone(), session_tokens.clone());

        Ok(Self {
            account_service,
            password_hasher,
            session_keys,
            session_tokens,
        })
    }

    /// Builds state over an empty in-memory store.
    pub fn in_memory(config: &ServiceConfig, session_keys: SessionKeys) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryAccountStore::new()), session_keys)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(account_service: AccountService);
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(session_tokens: SessionTokens);

#[cfg(test)]
impl ServiceState {
    /// State over an in-memory store and the fixed test key pair.
    pub(crate) fn for_tests() -> Result<Self> {
        Self::in_memory(&ServiceConfig::default(), test_session_keys())
    }
}
