//! Middleware for `axum::Router`: the request gate, recovery and tracing.

mod authentication;
mod observability;
mod recovery;

pub use authentication::{RouterAuthExt, require_authentication};
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
