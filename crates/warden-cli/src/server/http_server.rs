//! HTTP server startup.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::lifecycle::serve_with_shutdown;
use super::shutdown::shutdown_signal;
use super::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` with graceful shutdown.
///
/// After a shutdown signal, in-flight requests get up to the configured
/// shutdown timeout to finish before the server stops waiting for them.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "failed to bind to address"
        );
        ServerError::bind_error(server_addr, err)
    })?;

    let shutdown_timeout = server_config.shutdown_timeout();
    let draining = Arc::new(Notify::new());

    serve_with_shutdown(&server_config, || async move {
        let signal = {
            let draining = Arc::clone(&draining);
            async move {
                shutdown_signal().await;
                draining.notify_one();
            }
        };

        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(signal)
        .into_future();

        let deadline = async {
            draining.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        };

        tokio::select! {
            result = server => result.map_err(ServerError::Runtime),
            () = deadline => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "shutdown timeout elapsed with requests still in flight"
                );
                Ok(())
            }
        }
    })
    .await
}
