//! Translation of service errors into HTTP errors.
//!
//! Only the stable code and a generic message reach the caller. Storage and
//! internal sources are logged here and dropped.

use super::{Error, ErrorKind};
use crate::service::{AccountError, TokenError};
use crate::utility::tracing_targets::{
    TRACING_TARGET_ACCOUNTS, TRACING_TARGET_AUTHENTICATION,
};

impl From<AccountError> for Error<'static> {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::InvalidInput { field, reason } => ErrorKind::BadRequest
                .with_message(format!("Invalid {field}"))
                .with_resource("account")
                .with_context(format!("{field} {reason}")),
            AccountError::Conflict => ErrorKind::Conflict
                .with_message("Account already exists")
                .with_resource("account"),
            AccountError::NotFound => ErrorKind::NotFound
                .with_message("Account not found")
                .with_resource("account"),
            AccountError::Unauthorized => ErrorKind::Unauthorized
                .with_message("Invalid credentials")
                .with_resource("authentication"),
            AccountError::Storage {
                operation,
                retryable,
                source,
            } => {
                tracing::error!(
                    target: TRACING_TARGET_ACCOUNTS,
                    operation,
                    retryable,
                    error = %source,
                    "account storage failure"
                );

                ErrorKind::InternalServerError.into_error()
            }
            AccountError::Internal(source) => {
                tracing::error!(
                    target: TRACING_TARGET_ACCOUNTS,
                    error = %source,
                    "account service internal failure"
                );

                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

impl From<TokenError> for Error<'static> {
    fn from(error: TokenError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            reason = error.as_ref(),
            "bearer token rejected"
        );

        ErrorKind::Unauthorized
            .with_message("Invalid or expired token")
            .with_resource("authentication")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_stable_codes() {
        let cases = [
            (AccountError::invalid_input("email", "must contain '@'"), ErrorKind::BadRequest),
            (AccountError::Conflict, ErrorKind::Conflict),
            (AccountError::NotFound, ErrorKind::NotFound),
            (AccountError::Unauthorized, ErrorKind::Unauthorized),
            (
                AccountError::Internal(crate::Error::internal("password_hasher", "boom")),
                ErrorKind::InternalServerError,
            ),
        ];

        for (error, kind) in cases {
            assert_eq!(Error::from(error).kind(), kind);
        }
    }

    #[test]
    fn storage_details_are_not_exposed() {
        let error = Error::from(AccountError::storage(
            "insert",
            false,
            std::io::Error::other("relation \"accounts\" does not exist"),
        ));

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
        assert_eq!(error.context(), None);
    }

    #[test]
    fn every_token_error_is_unauthorized() {
        for error in [TokenError::SignatureInvalid, TokenError::Expired, TokenError::Malformed] {
            assert_eq!(Error::from(error).kind(), ErrorKind::Unauthorized);
        }
    }
}
