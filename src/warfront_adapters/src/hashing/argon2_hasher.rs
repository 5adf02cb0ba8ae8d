use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use warfront_core::{CredentialHasher, HashingError};

use crate::config::Argon2Settings;

/// Argon2 takes the password length as a 32-bit value.
pub const ARGON2_MAX_INPUT_BYTES: usize = u32::MAX as usize;

#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    pub fn new(settings: &Argon2Settings) -> Result<Self, HashingError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| HashingError::Unexpected(e.to_string()))?;

        Ok(Self { params })
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing Argon2id password hash", skip_all)]
    async fn hash(&self, password: &[u8]) -> Result<Secret<String>, HashingError> {
        if password.len() > ARGON2_MAX_INPUT_BYTES {
            return Err(HashingError::InputTooLong {
                max_len: ARGON2_MAX_INPUT_BYTES,
            });
        }

        let password = Secret::new(password.to_vec());
        let params = self.params.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .hash_password(password.expose_secret(), &salt)
                    .map(|hash| Secret::from(hash.to_string()))
                    .map_err(|e| HashingError::Unexpected(e.to_string()))
            })
        })
        .await
        .map_err(|e| HashingError::Unexpected(e.to_string()))?
    }
}
