//! JSON extractor whose rejections render as [`ErrorResponse`] bodies.
//!
//! [`ErrorResponse`]: crate::handler::response::ErrorResponse

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Drop-in replacement for [`axum::Json`] that rejects with `400 bad_request`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AxumJson(inner) = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(Self::new(inner))
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        let error = match &rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_context(sanitize_error_message(&err.body_text())),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(sanitize_error_message(&err.body_text())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Invalid content type")
                .with_context("Content-Type must be application/json"),
            _ => ErrorKind::BadRequest.with_message("Failed to read request body"),
        };

        error.with_resource("request")
    }
}

/// Keeps deserializer messages short: first line, at most 200 characters.
fn sanitize_error_message(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(200)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_truncates_to_first_line() {
        let message = format!("first line {}\nsecond line", "x".repeat(300));
        let sanitized = sanitize_error_message(&message);

        assert!(sanitized.starts_with("first line"));
        assert!(!sanitized.contains("second line"));
        assert_eq!(sanitized.chars().count(), 200);
    }
}
