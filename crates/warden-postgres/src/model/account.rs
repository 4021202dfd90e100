//! Account model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::accounts;

/// A row of the `accounts` table.
///
/// Carries the password hash and the last issued session token; callers must
/// strip both before the value leaves the service.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique login name (at least 3 characters).
    pub username: String,
    /// Unique email address.
    pub email_address: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Most recently issued session token.
    pub issued_token: Option<String>,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new account.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email_address: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

impl Account {
    /// Returns the creation time as a [`jiff::Timestamp`].
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}
