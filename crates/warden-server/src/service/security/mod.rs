//! Credential hashing and session token primitives.

mod password_hasher;
mod session_keys;
mod session_tokens;

pub use password_hasher::{DEFAULT_HASHER_MAX_CONCURRENCY, PasswordHasher};
pub use session_keys::{SessionKeys, SessionKeysConfig};
#[cfg(test)]
pub(crate) use session_keys::tests::test_session_keys;
pub use session_tokens::{
    AuthClaims, DEFAULT_TOKEN_TTL, IssuedToken, SessionTokens, TOKEN_AUDIENCE, TOKEN_ISSUER,
    TokenError,
};
