//! Request gate middleware.

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::extract::AuthState;
use crate::service::ServiceState;

/// Extension trait for `axum::`[`Router`] to require a valid bearer token.
pub trait RouterAuthExt<S> {
    /// Rejects requests to the routes added so far unless they carry a valid
    /// session token. Unmatched paths still fall through to the fallback.
    fn with_authentication(self, state: ServiceState) -> Self;
}

impl<S> RouterAuthExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_authentication(self, state: ServiceState) -> Self {
        self.route_layer(from_fn_with_state(state, require_authentication))
    }
}

/// Runs the request only if [`AuthState`] extraction succeeds.
///
/// The validated state stays in the request extensions for the handler.
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
