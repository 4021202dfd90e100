//! Repository traits implemented for [`PgConnection`].
//!
//! [`PgConnection`]: crate::PgConnection

pub mod account;

pub use account::AccountRepository;
