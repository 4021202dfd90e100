//! Response bodies.

mod accounts;
mod authentication;
mod error_response;

pub use accounts::{AccountResponse, AccountsResponse};
pub use authentication::LoginResponse;
pub use error_response::ErrorResponse;
