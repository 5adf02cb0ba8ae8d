use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use warfront_core::{Account, AccountId, AccountStore, AccountStoreError};

/// In-memory account store for tests and local development.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.username().as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.email().as_str() == email)
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let conflict = accounts.contains_key(&account.id())
            || accounts.values().any(|existing| {
                existing.username() == account.username() || existing.email() == account.email()
            });
        if conflict {
            return Err(AccountStoreError::AccountAlreadyExists);
        }

        let account = account.with_created_at(Utc::now());
        accounts.insert(account.id(), account.clone());
        Ok(account)
    }
}
