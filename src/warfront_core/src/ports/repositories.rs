use async_trait::async_trait;
use thiserror::Error;

use crate::domain::account::Account;

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Storage for player accounts.
///
/// Lookups take the raw strings the caller supplied, not value objects, so a
/// conflict check can run before any validation.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountStoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountStoreError>;

    /// Persist a new account and return it as stored.
    ///
    /// Implementations must enforce username and email uniqueness at write
    /// time and report a violation as [`AccountStoreError::AccountAlreadyExists`];
    /// a lookup followed by a create is not atomic across requests.
    async fn create(&self, account: Account) -> Result<Account, AccountStoreError>;
}
