//! JSON extractor that also runs `validator` rules.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Deserializes a JSON body and validates it, rejecting with `400 bad_request`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}' {message}");
    }

    let bound = |key: &str| error.params.get(key).and_then(|v| v.as_u64());
    match (error.code.as_ref(), bound("min"), bound("max")) {
        ("length", Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        ("length", Some(min), None) => {
            format!("Field '{field}' must be at least {min} characters long")
        }
        ("length", None, Some(max)) => {
            format!("Field '{field}' must be at most {max} characters long")
        }
        (code, ..) => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        messages.sort();

        tracing::debug!(
            errors = ?errors.field_errors(),
            "request validation failed"
        );

        let message = if messages.is_empty() {
            "Validation failed".to_owned()
        } else {
            messages.join(". ")
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}
