use jiff::Timestamp;
use serde::Serialize;

/// A stored account as the store sees it, secrets included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub issued_token: Option<String>,
    pub created_at: Timestamp,
}

/// Fields needed to insert a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// An account with its password hash and session token removed.
///
/// This is the only account shape that leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

impl From<warden_postgres::model::Account> for AccountRecord {
    fn from(account: warden_postgres::model::Account) -> Self {
        Self {
            created_at: account.created_at(),
            username: account.username,
            email: account.email_address,
            password_hash: account.password_hash,
            issued_token: account.issued_token,
        }
    }
}

impl From<NewAccountRecord> for warden_postgres::model::NewAccount {
    fn from(record: NewAccountRecord) -> Self {
        Self {
            username: record.username,
            email_address: record.email,
            password_hash: record.password_hash,
        }
    }
}
