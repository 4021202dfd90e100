use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use warden_postgres::{PgClient, PgClientExt, PgConfig};

use crate::service::security::{
    DEFAULT_HASHER_MAX_CONCURRENCY, DEFAULT_TOKEN_TTL, PasswordHasher, SessionKeys,
    SessionKeysConfig, SessionTokens,
};
use crate::{Error, Result};

/// Bounds on the configurable token lifetime, in seconds.
const MIN_TOKEN_TTL_SECS: u64 = 60;
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Upper bound on concurrent hashing jobs.
const MAX_HASHER_CONCURRENCY: usize = 256;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Postgres connection and pool settings.
    #[cfg_attr(feature = "config", command(flatten))]
    pub postgres_config: PgConfig,

    /// Session token key files.
    #[cfg_attr(feature = "config", command(flatten))]
    pub session_keys: SessionKeysConfig,

    /// Lifetime of issued session tokens in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TOKEN_TTL_SECS", default_value_t = 86_400)
    )]
    pub token_ttl_secs: u64,

    /// Maximum number of password hashes computed at once.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "HASHER_MAX_CONCURRENCY", default_value_t = 4)
    )]
    pub hasher_max_concurrency: usize,
}

impl ServiceConfig {
    /// Validates all configuration values.
    pub fn validate(&self) -> Result<()> {
        self.postgres_config
            .validate()
            .map_err(|e| Error::config("invalid postgres configuration").with_source(e))?;

        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(Error::config(format!(
                "token TTL must be between {MIN_TOKEN_TTL_SECS} and {MAX_TOKEN_TTL_SECS} seconds"
            )));
        }

        if !(1..=MAX_HASHER_CONCURRENCY).contains(&self.hasher_max_concurrency) {
            return Err(Error::config(format!(
                "hasher concurrency must be between 1 and {MAX_HASHER_CONCURRENCY}"
            )));
        }

        Ok(())
    }

    /// Returns the token lifetime as a [`Duration`].
    #[inline]
    pub const fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Connects to the Postgres database and runs pending migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = self.postgres_config.clone().build().map_err(|e| {
            Error::internal("postgres", "failed to create database client").with_source(e)
        })?;

        pg_client.run_pending_migrations().await.map_err(|e| {
            Error::external("postgres", "failed to apply database migrations").with_source(e)
        })?;

        Ok(pg_client)
    }

    /// Loads and checks the session key pair.
    pub async fn load_session_keys(&self) -> Result<SessionKeys> {
        let keys = SessionKeys::from_config(&self.session_keys).await?;
        keys.validate_keys()?;
        Ok(keys)
    }

    /// Creates the session token service over `keys`.
    pub fn create_session_tokens(&self, keys: SessionKeys) -> SessionTokens {
        SessionTokens::new(keys, self.token_ttl())
    }

    /// Creates the bounded password hasher.
    pub fn create_password_hasher(&self) -> Result<PasswordHasher> {
        PasswordHasher::with_max_concurrency(self.hasher_max_concurrency)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            postgres_config: PgConfig::default(),
            session_keys: SessionKeysConfig::default(),
            token_ttl_secs: DEFAULT_TOKEN_TTL.as_secs(),
            hasher_max_concurrency: DEFAULT_HASHER_MAX_CONCURRENCY,
        }
    }
}
