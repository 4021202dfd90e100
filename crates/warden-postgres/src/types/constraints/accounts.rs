//! Accounts table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Account table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AccountConstraints {
    // Account validation constraints
    #[strum(serialize = "accounts_username_length_min")]
    UsernameLengthMin,
    #[strum(serialize = "accounts_email_address_format")]
    EmailAddressFormat,
    #[strum(serialize = "accounts_password_hash_not_empty")]
    PasswordHashNotEmpty,

    // Account chronological constraints
    #[strum(serialize = "accounts_updated_after_created")]
    UpdatedAfterCreated,

    // Account unique constraints
    #[strum(serialize = "accounts_username_unique_idx")]
    UsernameUnique,
    #[strum(serialize = "accounts_email_address_unique_idx")]
    EmailAddressUnique,
}

impl AccountConstraints {
    /// Creates a new [`AccountConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AccountConstraints::UsernameLengthMin
            | AccountConstraints::EmailAddressFormat
            | AccountConstraints::PasswordHashNotEmpty => ConstraintCategory::Validation,

            AccountConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,

            AccountConstraints::UsernameUnique | AccountConstraints::EmailAddressUnique => {
                ConstraintCategory::Uniqueness
            }
        }
    }
}

impl From<AccountConstraints> for String {
    #[inline]
    fn from(val: AccountConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for AccountConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
