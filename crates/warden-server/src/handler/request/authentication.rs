use serde::Deserialize;
use validator::Validate;

/// Request payload for registration.
#[must_use]
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(max = 64))]
    pub username: String,
    #[validate(length(max = 254))]
    pub email: String,
    #[validate(length(max = 128))]
    pub password: String,
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(max = 64))]
    pub username: String,
    #[validate(length(max = 128))]
    pub password: String,
}
