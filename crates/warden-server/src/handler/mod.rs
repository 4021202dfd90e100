//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use warden_server::handler::routes;
//! use warden_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config).await?;
//!
//! let router = routes(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod authentication;
mod error;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all private routes.
fn private_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(accounts::routes())
        .with_authentication(state)
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new().merge(authentication::routes())
}

/// Returns a [`Router`] with all routes and the state applied.
///
/// Unknown paths answer `404 not_found` without passing the request gate.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(private_routes(state.clone()))
        .merge(public_routes())
        .fallback(handler)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::handler::routes;
    use crate::service::ServiceState;

    /// Returns a new [`TestServer`] over an in-memory store.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        let state = ServiceState::for_tests()?;
        let server = TestServer::new(routes(state))?;
        Ok(server)
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/nothing/here").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["name"], "not_found");

        Ok(())
    }
}
