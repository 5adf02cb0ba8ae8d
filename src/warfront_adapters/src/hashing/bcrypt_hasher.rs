use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use warfront_core::{CredentialHasher, HashingError};

/// bcrypt only reads the first 72 bytes of its input.
pub const BCRYPT_MAX_INPUT_BYTES: usize = 72;
pub const BCRYPT_MIN_COST: u32 = 4;
pub const BCRYPT_MAX_COST: u32 = 31;

/// bcrypt (`$2b$`) hasher that refuses inputs it would silently truncate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptCredentialHasher {
    cost: u32,
}

impl BcryptCredentialHasher {
    pub fn new(cost: u32) -> Result<Self, HashingError> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
            return Err(HashingError::Unexpected(format!(
                "bcrypt cost must be between {BCRYPT_MIN_COST} and {BCRYPT_MAX_COST}, got {cost}"
            )));
        }
        Ok(Self { cost })
    }
}

#[async_trait]
impl CredentialHasher for BcryptCredentialHasher {
    #[tracing::instrument(name = "Computing bcrypt password hash", skip_all)]
    async fn hash(&self, password: &[u8]) -> Result<Secret<String>, HashingError> {
        if password.len() > BCRYPT_MAX_INPUT_BYTES {
            return Err(HashingError::InputTooLong {
                max_len: BCRYPT_MAX_INPUT_BYTES,
            });
        }

        let password = Secret::new(password.to_vec());
        let cost = self.cost;
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                bcrypt::hash(password.expose_secret(), cost)
                    .map(Secret::from)
                    .map_err(|e| HashingError::Unexpected(e.to_string()))
            })
        })
        .await
        .map_err(|e| HashingError::Unexpected(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_verifies_and_is_salted() {
        let hasher = BcryptCredentialHasher::new(BCRYPT_MIN_COST).unwrap();
        let first = hasher.hash(b"password123").await.unwrap();
        let second = hasher.hash(b"password123").await.unwrap();

        assert!(first.expose_secret().starts_with("$2b$04$"));
        assert_eq!(first.expose_secret().len(), 60);
        assert_ne!(first.expose_secret(), second.expose_secret());
        assert!(bcrypt::verify("password123", first.expose_secret()).unwrap());
        assert!(!bcrypt::verify("password124", first.expose_secret()).unwrap());
    }

    #[tokio::test]
    async fn test_accepts_input_at_the_limit() {
        let hasher = BcryptCredentialHasher::new(BCRYPT_MIN_COST).unwrap();
        let password = vec![b'x'; BCRYPT_MAX_INPUT_BYTES];

        let hash = hasher.hash(&password).await.unwrap();
        assert!(bcrypt::verify(&password, hash.expose_secret()).unwrap());
    }

    #[tokio::test]
    async fn test_refuses_input_over_the_limit() {
        let hasher = BcryptCredentialHasher::new(BCRYPT_MIN_COST).unwrap();
        let result = hasher.hash(&[b'a'; 100]).await;

        assert_eq!(
            result.unwrap_err(),
            HashingError::InputTooLong {
                max_len: BCRYPT_MAX_INPUT_BYTES
            }
        );
    }

    #[test]
    fn test_cost_bounds() {
        assert!(BcryptCredentialHasher::new(3).is_err());
        assert!(BcryptCredentialHasher::new(32).is_err());
        assert!(BcryptCredentialHasher::new(12).is_ok());
    }
}
