//! Server lifecycle logging.

use std::future::Future;
use std::time::Instant;

use super::ServerResult;
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Runs the server future and logs readiness, uptime and failures.
pub async fn serve_with_shutdown<F>(
    server_config: &ServerConfig,
    serve_fn: impl FnOnce() -> F,
) -> ServerResult<()>
where
    F: Future<Output = ServerResult<()>>,
{
    let start_time = Instant::now();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_config.server_addr(),
        "server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server bound to all interfaces, ensure firewall is configured"
        );
    }

    let result = serve_fn().await;
    handle_result(result, start_time)
}

/// Logs the outcome of a finished server.
fn handle_result(result: ServerResult<()>, start_time: Instant) -> ServerResult<()> {
    let uptime = start_time.elapsed();

    match result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs = uptime.as_secs(),
                "shutdown completed"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                kind = ?err.io_error().kind(),
                uptime_secs = uptime.as_secs(),
                "fatal error"
            );

            if let Some(suggestion) = err.suggestion() {
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    suggestion,
                    "recovery suggestion"
                );
            }

            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::server::ServerError;

    #[tokio::test]
    async fn serve_with_shutdown_success() {
        let config = ServerConfig::default();
        let result = serve_with_shutdown(&config, || async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn serve_with_shutdown_handles_error() {
        let config = ServerConfig::default();
        let result = serve_with_shutdown(&config, || async {
            Err(ServerError::Runtime(io::Error::other("test error")))
        })
        .await;

        assert!(result.is_err());
    }
}
