use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use warfront_application::RegisterAccountUseCase;
use warfront_core::{
    Account, AccountId, AccountStore, CredentialHasher, Email, Faction, StartingResources,
    Username,
};

use super::error::RegisterApiError;
use crate::{
    config::{MAX_EMAIL_LENGTH, MIN_PASSWORD_LENGTH},
    token::JwtTokenService,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
    #[serde(alias = "country")]
    pub faction: Faction,
    #[serde(default, alias = "initial_resources")]
    pub starting_resources: StartingResources,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub faction: Faction,
    pub starting_resources: StartingResources,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            username: account.username().to_string(),
            email: account.email().to_string(),
            faction: account.faction(),
            starting_resources: account.starting_resources().clone(),
            created_at: account.created_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub player: AccountResponse,
    pub access_token: String,
    pub token_type: String,
}

/// Counter of registration attempts, labelled by `outcome`.
pub const REGISTRATIONS_TOTAL: &str = "warfront_registrations_total";

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, H>(
    State((account_store, hasher, token_service)): State<(S, H, JwtTokenService)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, RegisterApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let result = register_account(account_store, hasher, &token_service, request).await;
    record_outcome(&result);

    result.map(|response| (StatusCode::CREATED, Json(response)))
}

async fn register_account<S, H>(
    account_store: S,
    hasher: H,
    token_service: &JwtTokenService,
    request: RegisterRequest,
) -> Result<RegisterResponse, RegisterApiError>
where
    S: AccountStore,
    H: CredentialHasher,
{
    tracing::info!(
        username = %request.username,
        email = %request.email,
        "Account registration attempt"
    );

    validate_request(&request)?;

    let use_case = RegisterAccountUseCase::new(account_store, hasher);
    let account = use_case
        .execute(
            &request.username,
            &request.email,
            request.password,
            request.faction,
            Some(request.starting_resources),
        )
        .await?;

    let access_token = token_service.issue(&account.id())?;

    tracing::info!(
        account_id = %account.id(),
        username = %account.username(),
        "Account registered"
    );

    Ok(RegisterResponse {
        player: AccountResponse::from(&account),
        access_token,
        token_type: "bearer".to_string(),
    })
}

fn outcome_label(result: &Result<RegisterResponse, RegisterApiError>) -> &'static str {
    match result {
        Ok(_) => "created",
        Err(RegisterApiError::InvalidInput(_)) => "validation",
        Err(RegisterApiError::AccountAlreadyExists(_)) => "duplicate",
        Err(RegisterApiError::UnexpectedError(_)) => "unexpected",
    }
}

fn record_outcome(result: &Result<RegisterResponse, RegisterApiError>) {
    metrics::counter!(REGISTRATIONS_TOTAL, "outcome" => outcome_label(result)).increment(1);
}

// Reject malformed input before the use case touches the store.
fn validate_request(request: &RegisterRequest) -> Result<(), RegisterApiError> {
    Username::parse(request.username.as_str())?;

    // The accounts table stores at most 255 characters of email.
    if request.email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(RegisterApiError::InvalidInput(format!(
            "Email must be at most {MAX_EMAIL_LENGTH} characters"
        )));
    }
    Email::parse(request.email.as_str())?;

    if request.password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(RegisterApiError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}
