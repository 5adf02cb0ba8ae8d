pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId, StartingResources},
    email::Email,
    faction::{Faction, ParseFactionError},
    username::Username,
    validation_error::ValidationError,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{CredentialHasher, HashingError},
};
