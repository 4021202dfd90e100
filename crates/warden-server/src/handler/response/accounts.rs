use jiff::Timestamp;
use serde::Serialize;

use crate::service::Account;

/// Public view of an account.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

/// Every account, oldest first.
pub type AccountsResponse = Vec<AccountResponse>;
