use secrecy::{ExposeSecret, Secret};
use warfront_core::{
    Account, AccountStore, AccountStoreError, CredentialHasher, Email, Faction, HashingError,
    StartingResources, Username, ValidationError,
};

/// An existing account already holds the requested identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DuplicateAccountError {
    #[error("Username already exists")]
    Username,
    #[error("Email already exists")]
    Email,
}

/// Error types specific to the register account use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateAccountError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error("Account store error: {0}")]
    AccountStore(#[from] AccountStoreError),
}

/// Register account use case - creates a new player account
pub struct RegisterAccountUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    account_store: S,
    hasher: H,
}

impl<S, H> RegisterAccountUseCase<S, H>
where
    S: AccountStore,
    H: CredentialHasher,
{
    pub fn new(account_store: S, hasher: H) -> Self {
        Self {
            account_store,
            hasher,
        }
    }

    /// Execute the register account use case
    ///
    /// The username is checked before the email, and a username conflict
    /// ends the attempt without looking at the email. Nothing is written
    /// unless every check passes.
    ///
    /// # Arguments
    /// * `username` - Raw username as supplied by the player
    /// * `email` - Raw email as supplied by the player
    /// * `password` - Plain text password
    /// * `faction` - Chosen faction
    /// * `starting_resources` - Initial resources, empty when omitted
    ///
    /// # Returns
    /// The account as returned by the store, including any fields it assigned
    #[tracing::instrument(name = "RegisterAccountUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: &str,
        email: &str,
        password: Secret<String>,
        faction: Faction,
        starting_resources: Option<StartingResources>,
    ) -> Result<Account, RegisterError> {
        if self
            .account_store
            .find_by_username(username)
            .await?
            .is_some()
        {
            return Err(DuplicateAccountError::Username.into());
        }

        if self.account_store.find_by_email(email).await?.is_some() {
            return Err(DuplicateAccountError::Email.into());
        }

        let credential_hash = self.hash_password(&password).await?;

        let account = Account::new(
            Username::parse(username)?,
            Email::parse(email)?,
            credential_hash,
            faction,
            starting_resources.unwrap_or_default(),
        );

        Ok(self.account_store.create(account).await?)
    }

    /// Hash the password, truncating it to the scheme's input limit when the
    /// hasher refuses the full length.
    async fn hash_password(
        &self,
        password: &Secret<String>,
    ) -> Result<Secret<String>, HashingError> {
        let bytes = password.expose_secret().as_bytes();

        match self.hasher.hash(bytes).await {
            Err(HashingError::InputTooLong { max_len }) => {
                tracing::warn!(
                    max_len,
                    "Password exceeds hashing input limit, hashing truncated bytes"
                );
                self.hasher.hash(&bytes[..max_len.min(bytes.len())]).await
            }
            result => result,
        }
    }
}
