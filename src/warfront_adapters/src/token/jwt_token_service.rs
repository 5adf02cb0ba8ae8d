use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use warfront_core::AccountId;

use crate::config::JwtSettings;

#[derive(Debug, Error)]
pub enum TokenConfigError {
    #[error("JWT secret must be set")]
    MissingSecret,
    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Token time to live must be at least one minute, got {0}")]
    InvalidTtl(i64),
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token: {0}")]
    Invalid(String),
    #[error("Failed to issue token: {0}")]
    Issuance(String),
}

/// Payload of an access token.
///
/// A `sub` that is missing or not a string decodes as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<String>,
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(sub)) => Some(sub),
        _ => None,
    })
}

/// Issues and verifies HMAC-signed bearer tokens naming an account.
#[derive(Clone)]
pub struct JwtTokenService {
    secret: Secret<String>,
    algorithm: Algorithm,
    time_to_live: Duration,
}

impl JwtTokenService {
    pub fn new(settings: &JwtSettings) -> Result<Self, TokenConfigError> {
        let secret = settings
            .secret
            .clone()
            .filter(|secret| !secret.expose_secret().is_empty())
            .ok_or(TokenConfigError::MissingSecret)?;

        let algorithm = match settings.algorithm.parse::<Algorithm>() {
            Ok(algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => algorithm,
            _ => {
                return Err(TokenConfigError::UnsupportedAlgorithm(
                    settings.algorithm.clone(),
                ));
            }
        };

        if settings.access_token_expire_minutes < 1 {
            return Err(TokenConfigError::InvalidTtl(
                settings.access_token_expire_minutes,
            ));
        }
        let time_to_live = Duration::try_minutes(settings.access_token_expire_minutes)
            .ok_or(TokenConfigError::InvalidTtl(settings.access_token_expire_minutes))?;

        Ok(Self {
            secret,
            algorithm,
            time_to_live,
        })
    }

    /// Sign a token for `account_id` that expires one time-to-live from now.
    #[tracing::instrument(name = "JwtTokenService::issue", skip(self))]
    pub fn issue(&self, account_id: &AccountId) -> Result<String, TokenError> {
        let exp = Utc::now()
            .checked_add_signed(self.time_to_live)
            .ok_or_else(|| TokenError::Issuance("Duration out of range".to_string()))?
            .timestamp();

        let claims = Claims {
            sub: Some(account_id.to_string()),
            exp,
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| TokenError::Issuance(e.to_string()))
    }

    /// Check the signature, algorithm and expiry of `token`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
    }

    /// The account id a valid token was issued for.
    pub fn subject_of(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token)?
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| TokenError::Invalid("Token does not contain an account id".to_string()))
    }
}
