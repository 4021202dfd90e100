//! Recovery middleware for handler panics, middleware errors and timeouts.

use std::any::Any;
use std::future::ready;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};
use crate::utility::tracing_targets::{
    TRACING_TARGET_RECOVERY_ERROR, TRACING_TARGET_RECOVERY_PANIC,
};

type ResponseFut = BoxFuture<'static, Response>;
type Panic = Box<dyn Any + Send + 'static>;

/// Request timeout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may take before it is aborted with a 500 response (1-300).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value = "30")
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
        }
    }
}

impl RecoveryConfig {
    /// Creates a configuration with the given timeout in seconds.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            request_timeout: secs,
        }
    }

    /// Returns the request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Checks that the timeout is within 1-300 seconds.
    pub fn validate(&self) -> crate::Result<()> {
        if !(1..=300).contains(&self.request_timeout) {
            return Err(crate::Error::config(format!(
                "request timeout {} seconds is invalid, must be between 1 and 300",
                self.request_timeout
            )));
        }

        Ok(())
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Layers timeout, panic and error recovery with the given configuration.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        let middlewares = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .layer(CatchPanicLayer::custom(catch_panic))
            .layer(TimeoutLayer::new(config.request_timeout()));

        self.layer(middlewares)
    }
}

fn handle_error(err: tower::BoxError) -> ResponseFut {
    use tower::timeout::error::Elapsed;

    let error = if err.is::<Elapsed>() {
        tracing::error!(
            target: TRACING_TARGET_RECOVERY_ERROR,
            error = %err,
            "request timeout exceeded"
        );

        ErrorKind::InternalServerError
            .with_message("Request timeout")
            .with_context("The request took too long to process and was terminated")
    } else {
        tracing::error!(
            target: TRACING_TARGET_RECOVERY_ERROR,
            error = %err,
            "unknown middleware error"
        );

        Error::new(ErrorKind::InternalServerError)
    };

    ready(error.into_response()).boxed()
}

fn catch_panic(err: Panic) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic type");

    tracing::error!(
        target: TRACING_TARGET_RECOVERY_PANIC,
        message = %message,
        "service panic"
    );

    Error::new(ErrorKind::InternalServerError).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[test]
    fn validate_timeout_bounds() {
        assert!(RecoveryConfig::default().validate().is_ok());
        assert!(RecoveryConfig::with_timeout_secs(0).validate().is_err());
        assert!(RecoveryConfig::with_timeout_secs(301).validate().is_err());
    }

    #[tokio::test]
    async fn panics_become_internal_errors() -> anyhow::Result<()> {
        async fn explode() -> &'static str {
            panic!("handler exploded")
        }

        let app = Router::new()
            .route("/explode", get(explode))
            .with_recovery(&RecoveryConfig::default());
        let server = TestServer::new(app)?;

        let response = server.get("/explode").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<serde_json::Value>()["name"], "internal_server_error");

        Ok(())
    }

    #[tokio::test]
    async fn slow_requests_time_out() -> anyhow::Result<()> {
        async fn stall() -> &'static str {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "done"
        }

        let app = Router::new()
            .route("/stall", get(stall))
            .with_recovery(&RecoveryConfig::with_timeout_secs(1));
        let server = TestServer::new(app)?;

        let response = server.get("/stall").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}
