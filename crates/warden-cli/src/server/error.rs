//! Server error types with recovery suggestions.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Creates a bind error with address context.
    pub fn bind_error(address: impl ToString, source: io::Error) -> Self {
        Self::BindError {
            address: address.to_string(),
            source,
        }
    }

    /// Returns the underlying IO error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::BindError { source, .. } => source,
            Self::Runtime(err) => err,
        }
    }

    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.io_error().kind() {
            io::ErrorKind::PermissionDenied => {
                Some("Try using a port above 1024 or run with appropriate privileges")
            }
            io::ErrorKind::AddrInUse => Some(
                "The port is already in use. Try a different port or stop the conflicting service",
            ),
            io::ErrorKind::AddrNotAvailable => {
                Some("The address is not available. Check network interface configuration")
            }
            _ => None,
        }
    }
}
