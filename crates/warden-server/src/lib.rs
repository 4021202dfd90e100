#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;
mod utility;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::utility::tracing_targets::{
    TRACING_TARGET_ACCOUNTS, TRACING_TARGET_AUTHENTICATION, TRACING_TARGET_PASSWORD_HASHER,
    TRACING_TARGET_RECOVERY_ERROR, TRACING_TARGET_RECOVERY_PANIC, TRACING_TARGET_SESSION_KEYS,
    TRACING_TARGET_SESSION_TOKENS,
};
