//! Validated identity of the caller.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;

use super::AuthHeader;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::Error;
use crate::service::{AuthClaims, SessionTokens};

/// Claims of a bearer token that passed signature, issuer, audience and
/// expiry checks.
///
/// The first extraction in a request validates the token and stores the
/// result in the request extensions. Later extractions, including the one in
/// a handler behind [`require_authentication`], reuse it.
///
/// [`require_authentication`]: crate::middleware::require_authentication
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Returns the authenticated username.
    #[inline]
    pub fn username(&self) -> &str {
        self.0.username()
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Send + Sync,
    SessionTokens: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let session_tokens = SessionTokens::from_ref(state);
        let claims = session_tokens.validate(auth_header.token())?;

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            username = %claims.sub,
            token_id = %claims.jti,
            "request authenticated"
        );

        let auth_state = Self(claims);
        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}
