//! Request bodies.
//!
//! Only upper bounds are checked here. Minimum lengths and the email shape are
//! the account service's rules and are reported by it.

mod accounts;
mod authentication;

pub use accounts::{ChangePasswordRequest, ChangeUsernameRequest, DeleteAccountRequest};
pub use authentication::{LoginRequest, RegisterRequest};
