//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig      # Host, port, shutdown
//! ├── recovery: RecoveryConfig  # Request timeout
//! └── service: ServiceConfig    # Postgres, session keys, token TTL, hasher
//! ```
//!
//! Every option can be given as a flag or an environment variable. Use
//! `--help` to see them all.
//!
//! ```bash
//! warden --postgres-url "postgresql://..." --port 8080
//! POSTGRES_URL="postgresql://..." PORT=8080 warden
//! ```

mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use warden_server::middleware::RecoveryConfig;
use warden_server::service::ServiceConfig;

pub use self::server::ServerConfig;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "warden")]
#[command(about = "User-account service with bearer-token sessions")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,

    /// Account service configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads the `.env` file (if enabled) and parses CLI arguments.
    ///
    /// Loading first lets values from `.env` act as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, `info` by default.
    pub fn init_tracing() -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .context("failed to initialize tracing")
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.recovery
            .validate()
            .context("invalid recovery configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration without secrets.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "starting warden server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "build information"
        );

        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "recovery configuration"
        );

        let postgres = &self.service.postgres_config;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            postgres_url = %postgres.database_url_masked(),
            postgres_max_connections = postgres.postgres_max_connections,
            postgres_connection_timeout_secs = ?postgres.postgres_connection_timeout_secs,
            postgres_idle_timeout_secs = ?postgres.postgres_idle_timeout_secs,
            "database configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            public_pem = %self.service.session_keys.decoding_key.display(),
            private_pem = %self.service.session_keys.encoding_key.display(),
            token_ttl_secs = self.service.token_ttl_secs,
            hasher_max_concurrency = self.service.hasher_max_concurrency,
            "authentication configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_flags() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "warden",
            "--port",
            "9090",
            "--token-ttl-secs",
            "3600",
            "--request-timeout",
            "10",
        ])?;

        assert_eq!(cli.server.port, 9090);
        assert_eq!(cli.service.token_ttl_secs, 3600);
        assert_eq!(cli.recovery.request_timeout, 10);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_values() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["warden", "--token-ttl-secs", "1"])?;
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["warden", "--request-timeout", "0"])?;
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["warden", "--port", "80"])?;
        assert!(cli.validate().is_err());
        Ok(())
    }
}
