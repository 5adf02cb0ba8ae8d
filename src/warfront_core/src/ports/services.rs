use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashingError {
    /// The scheme refuses inputs longer than `max_len` bytes.
    #[error("Password exceeds the {max_len} byte limit of the hashing scheme")]
    InputTooLong { max_len: usize },
    #[error("Failed to hash password: {0}")]
    Unexpected(String),
}

/// Salted, adaptive one-way hashing of credentials.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &[u8]) -> Result<Secret<String>, HashingError>;
}
