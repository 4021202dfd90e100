//! Database constraint violations organized by table.

mod accounts;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::accounts::AccountConstraints;

/// Any named constraint this crate knows how to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Account(AccountConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// ```
    /// use warden_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("accounts_email_address_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        match constraint.split('_').next()? {
            "accounts" => AccountConstraints::new(constraint).map(Self::Account),
            _ => None,
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Account(_) => "accounts",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Account(c) => c.categorize(),
        }
    }

    /// Returns `true` for unique index violations.
    #[inline]
    pub fn is_uniqueness(&self) -> bool {
        self.constraint_category() == ConstraintCategory::Uniqueness
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Account(c) => write!(f, "{}", c),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_parsing() {
        assert_eq!(
            ConstraintViolation::new("accounts_username_unique_idx"),
            Some(ConstraintViolation::Account(
                AccountConstraints::UsernameUnique
            ))
        );
        assert_eq!(ConstraintViolation::new("accounts_pkey"), None);
        assert_eq!(ConstraintViolation::new("sessions_token_idx"), None);
        assert_eq!(ConstraintViolation::new(""), None);
    }

    #[test]
    fn uniqueness_and_table_name() {
        let violation = ConstraintViolation::Account(AccountConstraints::EmailAddressUnique);
        assert!(violation.is_uniqueness());
        assert_eq!(violation.table_name(), "accounts");
        assert_eq!(violation.to_string(), "accounts_email_address_unique_idx");

        let violation = ConstraintViolation::Account(AccountConstraints::EmailAddressFormat);
        assert!(!violation.is_uniqueness());
    }

    #[test]
    fn serde_uses_constraint_names() {
        let violation = ConstraintViolation::Account(AccountConstraints::UsernameUnique);
        let name: String = violation.clone().into();
        assert_eq!(ConstraintViolation::try_from(name), Ok(violation));
        assert!(ConstraintViolation::try_from("nope".to_string()).is_err());
    }
}
