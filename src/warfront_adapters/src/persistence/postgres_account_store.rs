use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use uuid::Uuid;
use warfront_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, Faction, StartingResources,
    Username,
};

/// Account store backed by the `accounts` table.
///
/// Username and email carry unique constraints; an insert that trips one
/// is reported as [`AccountStoreError::AccountAlreadyExists`].
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresAccountStore { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Retrieving account by username from PostgreSQL", skip_all)]
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, username, email, credential_hash, faction, starting_resources, created_at
                FROM accounts
                WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.as_ref().map(account_from_row).transpose()
    }

    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, username, email, credential_hash, faction, starting_resources, created_at
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.as_ref().map(account_from_row).transpose()
    }

    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn create(&self, account: Account) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(
            r#"
                INSERT INTO accounts (id, username, email, credential_hash, faction, starting_resources)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, username, email, credential_hash, faction, starting_resources, created_at
            "#,
        )
        .bind(*account.id().as_uuid())
        .bind(account.username().as_str())
        .bind(account.email().as_str())
        .bind(account.credential_hash().expose_secret().as_str())
        .bind(account.faction().as_str())
        .bind(Json(account.starting_resources().clone()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountStoreError::AccountAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        account_from_row(&row)
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, AccountStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let username: String = row.try_get("username").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let credential_hash: String = row.try_get("credential_hash").map_err(unexpected)?;
    let faction: String = row.try_get("faction").map_err(unexpected)?;
    let Json(starting_resources): Json<StartingResources> =
        row.try_get("starting_resources").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;

    let account = Account::new(
        Username::parse(username).map_err(unexpected)?,
        Email::parse(email).map_err(unexpected)?,
        Secret::from(credential_hash),
        faction.parse::<Faction>().map_err(unexpected)?,
        starting_resources,
    )
    .with_id(AccountId::from(id))
    .with_created_at(created_at);

    Ok(account)
}

fn unexpected(e: impl ToString) -> AccountStoreError {
    AccountStoreError::UnexpectedError(e.to_string())
}
