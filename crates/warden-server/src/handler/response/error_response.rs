use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of every error response.
///
/// `name` is the stable machine-readable code; `message` is safe to show to
/// an end user and never carries storage or crypto error text.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// Stable error code, e.g. `unauthorized`.
    pub name: Cow<'a, str>,
    /// Human-readable description.
    pub message: Cow<'a, str>,
    /// What the error relates to, e.g. `authentication` or `account`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Extra detail about the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status, not part of the body.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "Authentication is required to access this resource",
        StatusCode::UNAUTHORIZED,
    );
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "The authentication token format is invalid",
        StatusCode::UNAUTHORIZED,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "Invalid or expired authentication credentials",
        StatusCode::UNAUTHORIZED,
    );
    pub const FORBIDDEN: Self = Self::new(
        "forbidden",
        "You don't have permission to access this resource",
        StatusCode::FORBIDDEN,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "The request conflicts with the current state of the resource",
        StatusCode::CONFLICT,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Appends `message` to the default message as a second sentence.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Cow::Owned(format!("{}. {}", self.message, message.into()));
        self
    }

    /// Sets the resource, nesting it under an existing one with `/`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let resource = resource.into();
        self.resource = Some(match self.resource.take() {
            Some(existing) => Cow::Owned(format!("{existing}/{resource}")),
            None => resource,
        });
        self
    }

    /// Sets the context, joining it to an existing one with `; `.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(existing) => Cow::Owned(format!("{existing}; {context}")),
            None => context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_appended() {
        let response = ErrorResponse::CONFLICT.with_message("Account already exists");
        assert_eq!(
            response.message,
            "The request conflicts with the current state of the resource. Account already exists"
        );
    }

    #[test]
    fn resource_and_context_are_joined() {
        let response = ErrorResponse::BAD_REQUEST
            .with_resource("account")
            .with_resource("username")
            .with_context("too short")
            .with_context("min 3");

        assert_eq!(response.resource.as_deref(), Some("account/username"));
        assert_eq!(response.context.as_deref(), Some("too short; min 3"));
    }

    #[test]
    fn status_is_not_serialized() -> anyhow::Result<()> {
        let json = serde_json::to_value(ErrorResponse::UNAUTHORIZED)?;
        assert_eq!(json["name"], "unauthorized");
        assert!(json.get("status").is_none());
        assert!(json.get("resource").is_none());

        Ok(())
    }
}
