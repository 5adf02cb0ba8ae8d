pub mod config;
pub mod hashing;
pub mod http;
pub mod persistence;
pub mod token;

pub use hashing::{Argon2CredentialHasher, BcryptCredentialHasher, ConfiguredHasher};
pub use persistence::{HashMapAccountStore, PostgresAccountStore};
pub use token::{Claims, JwtTokenService, TokenConfigError, TokenError};
