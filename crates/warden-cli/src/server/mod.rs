//! HTTP server startup, lifecycle and graceful shutdown.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;

pub use self::error::{ServerError, ServerResult};
use self::http_server::serve_http;
use crate::config::ServerConfig;

/// Serves `app` until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while
/// running.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    serve_http(app, config).await
}
