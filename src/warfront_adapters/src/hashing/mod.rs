pub mod argon2_hasher;
pub mod bcrypt_hasher;

use async_trait::async_trait;
use secrecy::Secret;
use warfront_core::{CredentialHasher, HashingError};

use crate::config::{HashScheme, HashingSettings};

pub use argon2_hasher::Argon2CredentialHasher;
pub use bcrypt_hasher::BcryptCredentialHasher;

/// The hasher selected by `auth.hashing.scheme`.
#[derive(Debug, Clone)]
pub enum ConfiguredHasher {
    Argon2id(Argon2CredentialHasher),
    Bcrypt(BcryptCredentialHasher),
}

impl ConfiguredHasher {
    pub fn from_settings(settings: &HashingSettings) -> Result<Self, HashingError> {
        match settings.scheme {
            HashScheme::Argon2id => {
                Argon2CredentialHasher::new(&settings.argon2).map(Self::Argon2id)
            }
            HashScheme::Bcrypt => {
                BcryptCredentialHasher::new(settings.bcrypt_cost).map(Self::Bcrypt)
            }
        }
    }
}

#[async_trait]
impl CredentialHasher for ConfiguredHasher {
    async fn hash(&self, password: &[u8]) -> Result<Secret<String>, HashingError> {
        match self {
            Self::Argon2id(hasher) => hasher.hash(password).await,
            Self::Bcrypt(hasher) => hasher.hash(password).await,
        }
    }
}
