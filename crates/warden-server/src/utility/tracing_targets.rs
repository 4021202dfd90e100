//! Tracing target constants for structured logging.
//!
//! Using consistent targets enables fine-grained control over log output via
//! `RUST_LOG` filters, e.g. `warden_server::authentication=debug`.

/// Request gate: bearer extraction and token validation.
pub const TRACING_TARGET_AUTHENTICATION: &str = "warden_server::authentication";

/// Account use cases: register, login, credential changes, deletion.
pub const TRACING_TARGET_ACCOUNTS: &str = "warden_server::accounts";

/// Password hashing and verification operations.
pub const TRACING_TARGET_PASSWORD_HASHER: &str = "warden_server::password_hasher";

/// Session key loading and validation.
pub const TRACING_TARGET_SESSION_KEYS: &str = "warden_server::session_keys";

/// Session token issuance and validation.
pub const TRACING_TARGET_SESSION_TOKENS: &str = "warden_server::session_tokens";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "warden_server::recovery::error";

/// Panic recovery including handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "warden_server::recovery::panic";
