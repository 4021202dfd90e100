use jiff::Timestamp;
use serde::Serialize;

use crate::service::IssuedToken;

/// Session token returned by a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Compact JWT to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// When the token stops being accepted.
    pub expires_at: Timestamp,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            expires_at: issued.expires_at(),
            token: issued.token,
            token_type: "Bearer",
        }
    }
}
