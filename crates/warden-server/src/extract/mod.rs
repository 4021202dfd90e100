//! HTTP request extractors rejecting with [`Error`](crate::handler::Error).
//!
//! - [`AuthHeader`]: bearer token from the `Authorization` header
//! - [`AuthState`]: validated token claims, cached per request
//! - [`Json`] and [`ValidateJson`]: request bodies

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthHeader, AuthState};
pub use crate::extract::reject::{Json, ValidateJson};
