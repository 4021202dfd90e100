//! Request tracing middleware.

use axum::Router;
use axum::http::header;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Extension trait for `axum::`[`Router`] to apply request tracing.
pub trait RouterObservabilityExt<S> {
    /// Logs every request and response through `tracing`, with the
    /// `Authorization` header redacted.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(TraceLayer::new_for_http())
            .layer(SetSensitiveRequestHeadersLayer::new([header::AUTHORIZATION]))
    }
}
