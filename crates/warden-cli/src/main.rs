#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use warden_server::handler::routes;
use warden_server::middleware::{RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt};
use warden_server::service::{ServiceConfig, ServiceState};

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "warden_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "warden_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "warden_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing()?;
    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli.service).await?;
    let router = create_router(state, &cli.recovery);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the service state from configuration.
async fn create_service_state(config: &ServiceConfig) -> anyhow::Result<ServiceState> {
    ServiceState::from_config(config)
        .await
        .context("failed to create service state")
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost): catches panics and enforces the request timeout
/// 2. Observability: tracing spans with the `Authorization` header redacted
/// 3. Routes (innermost): the request gate and handlers
fn create_router(state: ServiceState, recovery: &RecoveryConfig) -> Router {
    routes(state).with_observability().with_recovery(recovery)
}
