//! Database models for all tables in the system.

mod account;

pub use account::{Account, NewAccount};
