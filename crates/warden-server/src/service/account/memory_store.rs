//! In-process [`AccountStore`] used by tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use super::{AccountError, AccountRecord, AccountResult, AccountStore, NewAccountRecord};

/// Accounts kept in a lock-guarded map keyed by username.
///
/// Uniqueness checks and writes happen under one write lock, so concurrent
/// registrations for the same name cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Returns `true` if no accounts are stored.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    /// Returns the last issued token recorded for `username`.
    pub async fn issued_token(&self, username: &str) -> Option<String> {
        let accounts = self.accounts.read().await;
        accounts.get(username).and_then(|a| a.issued_token.clone())
    }
}

fn email_taken(accounts: &HashMap<String, AccountRecord>, email: &str) -> bool {
    accounts.values().any(|a| a.email == email)
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn exists(&self, username: &str, email: &str) -> AccountResult<bool> {
        let accounts = self.accounts.read().await;
        Ok(accounts.contains_key(username) || email_taken(&accounts, email))
    }

    async fn insert(&self, account: NewAccountRecord) -> AccountResult<AccountRecord> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) || email_taken(&accounts, &account.email) {
            return Err(AccountError::Conflict);
        }

        let record = AccountRecord {
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            issued_token: None,
            created_at: Timestamp::now(),
        };

        accounts.insert(record.username.clone(), record.clone());
        Ok(record)
    }

    async fn find_password_hash(&self, username: &str) -> AccountResult<String> {
        let accounts = self.accounts.read().await;
        accounts
            .get(username)
            .map(|a| a.password_hash.clone())
            .ok_or(AccountError::NotFound)
    }

    async fn delete(&self, username: &str) -> AccountResult<bool> {
        Ok(self.accounts.write().await.remove(username).is_some())
    }

    async fn update_password_hash(&self, username: &str, password_hash: &str) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(username).ok_or(AccountError::NotFound)?;
        account.password_hash = password_hash.to_owned();
        Ok(())
    }

    async fn update_username(&self, username: &str, new_username: &str) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(username) {
            return Err(AccountError::NotFound);
        }

        if username == new_username {
            return Ok(());
        }

        if accounts.contains_key(new_username) {
            return Err(AccountError::Conflict);
        }

        if let Some(mut account) = accounts.remove(username) {
            account.username = new_username.to_owned();
            accounts.insert(account.username.clone(), account);
        }

        Ok(())
    }

    async fn update_issued_token(&self, username: &str, token: &str) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(username).ok_or(AccountError::NotFound)?;
        account.issued_token = Some(token.to_owned());
        Ok(())
    }

    async fn list_all(&self) -> AccountResult<Vec<AccountRecord>> {
        let accounts = self.accounts.read().await;
        let mut records: Vec<_> = accounts.values().cloned().collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });

        Ok(records)
    }
}
