//! Bearer token extraction from the `Authorization` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind};

/// Raw bearer token from `Authorization: Bearer <token>`.
///
/// Only checks the shape of the header. Use [`AuthState`] for a validated
/// identity.
///
/// [`AuthState`]: crate::extract::AuthState
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    /// Returns the token without the scheme.
    #[inline]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthHeader").field(&"<redacted>").finish()
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(TypedHeader(authorization)) => {
                let auth_header = Self(authorization.token().to_owned());
                parts.extensions.insert(auth_header.clone());
                Ok(auth_header)
            }
            Err(rejection) => {
                let error = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_message("Authentication required")
                        .with_context("Missing Authorization header with Bearer token"),
                    _ => {
                        tracing::debug!(
                            target: TRACING_TARGET_AUTHENTICATION,
                            "authorization header is not a bearer token"
                        );

                        ErrorKind::MalformedAuthToken
                            .with_message("Invalid token format")
                            .with_context("Authorization header must contain a Bearer token")
                    }
                };

                Err(error.with_resource("authentication"))
            }
        }
    }
}
