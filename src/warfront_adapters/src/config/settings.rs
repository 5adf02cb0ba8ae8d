use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use config::{Config, ConfigBuilder, File, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use crate::hashing::bcrypt_hasher::{BCRYPT_MAX_COST, BCRYPT_MIN_COST};

use super::constants::{
    DEFAULT_API_PREFIX, DEFAULT_CONFIG_DIR,
    env::{APP_ENVIRONMENT_ENV_VAR, CONFIG_DIR_ENV_VAR, ENV_PREFIX},
    prod::APP_ADDRESS,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Service configuration.
///
/// Built from `configuration/base.*`, then `configuration/<environment>.*`,
/// then `WARFRONT_*` environment variables (`__` separates nested keys, e.g.
/// `WARFRONT_AUTH__JWT__SECRET`). `WARFRONT_APPLICATION__ENVIRONMENT` picks
/// the environment file. Everything except the database url has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var(CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
        let environment =
            Environment::from_env_value(std::env::var(APP_ENVIRONMENT_ENV_VAR).ok())?;

        Self::build(layered_builder(&config_dir, environment)?)
    }

    pub(crate) fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.auth.jwt.access_token_expire_minutes < 1 {
            return Err(SettingsError::Invalid {
                key: "auth.jwt.access_token_expire_minutes",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&self.auth.hashing.bcrypt_cost) {
            return Err(SettingsError::Invalid {
                key: "auth.hashing.bcrypt_cost",
                reason: format!("must be between {BCRYPT_MIN_COST} and {BCRYPT_MAX_COST}"),
            });
        }
        if self.database.max_connections == 0 {
            return Err(SettingsError::Invalid {
                key: "database.max_connections",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Base file, then the file named after `environment`, then `WARFRONT_*`
/// variables. `application.environment` is pinned to the environment whose
/// file was loaded.
fn layered_builder(
    config_dir: &Path,
    environment: Environment,
) -> Result<ConfigBuilder<DefaultState>, SettingsError> {
    let builder = Config::builder()
        .add_source(File::from(config_dir.join("base")).required(false))
        .add_source(File::from(config_dir.join(environment.as_str())).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        )
        .set_override("application.environment", environment.as_str())?;

    Ok(builder)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    fn from_env_value(value: Option<String>) -> Result<Self, SettingsError> {
        match value.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("") | Some("development") => Ok(Environment::Development),
            Some("staging") => Ok(Environment::Staging),
            Some("production") => Ok(Environment::Production),
            Some(other) => Err(SettingsError::Invalid {
                key: "application.environment",
                reason: format!("`{other}` is not one of development, staging or production"),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub name: String,
    pub environment: Environment,
    pub address: String,
    pub api_prefix: String,
    pub log_level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            name: "warfront".to_string(),
            environment: Environment::default(),
            address: APP_ADDRESS.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub hashing: HashingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    /// No default: a missing secret is reported when the token service is built.
    pub secret: Option<Secret<String>>,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    #[default]
    Argon2id,
    Bcrypt,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashingSettings {
    pub scheme: HashScheme,
    pub bcrypt_cost: u32,
    pub argon2: Argon2Settings,
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            scheme: HashScheme::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            argon2: Argon2Settings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Argon2Settings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: 15000,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilitySettings {
    /// Serve Prometheus metrics on `/metrics`.
    pub prometheus_enabled: bool,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            prometheus_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: AllowedOrigins,
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self(vec![
            "http://localhost:3000".to_string(),
            "http://localhost:8000".to_string(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use secrecy::ExposeSecret;

    fn from_json(raw: &str) -> Result<Settings, SettingsError> {
        Settings::build(Config::builder().add_source(File::from_str(raw, FileFormat::Json)))
    }

    #[test]
    fn test_defaults_apply_when_only_database_is_set() {
        let settings = from_json(r#"{ "database": { "url": "postgres://localhost/warfront" } }"#)
            .unwrap();

        assert_eq!(
            settings.database.url.expose_secret(),
            "postgres://localhost/warfront"
        );
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.application.api_prefix, "/api/v1");
        assert_eq!(settings.application.environment, Environment::Development);
        assert!(settings.auth.jwt.secret.is_none());
        assert_eq!(settings.auth.jwt.algorithm, "HS256");
        assert_eq!(settings.auth.jwt.access_token_expire_minutes, 30);
        assert_eq!(settings.auth.hashing.scheme, HashScheme::Argon2id);
        assert_eq!(settings.auth.hashing.bcrypt_cost, 12);
        assert!(settings.observability.prometheus_enabled);
    }

    #[test]
    fn test_nested_values_override_defaults() {
        let settings = from_json(
            r#"{
                "application": { "environment": "production", "api_prefix": "/api/v2" },
                "database": { "url": "postgres://db/warfront", "max_connections": 3 },
                "auth": {
                    "jwt": { "secret": "s3cret", "algorithm": "HS512", "access_token_expire_minutes": 5 },
                    "hashing": { "scheme": "bcrypt", "bcrypt_cost": 10 }
                },
                "cors": { "allowed_origins": ["https://game.example.com"] },
                "observability": { "prometheus_enabled": false }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.application.environment, Environment::Production);
        assert_eq!(settings.application.api_prefix, "/api/v2");
        assert_eq!(settings.database.max_connections, 3);
        assert_eq!(
            settings.auth.jwt.secret.as_ref().map(|s| s.expose_secret().as_str()),
            Some("s3cret")
        );
        assert_eq!(settings.auth.jwt.algorithm, "HS512");
        assert_eq!(settings.auth.hashing.scheme, HashScheme::Bcrypt);
        assert_eq!(settings.auth.hashing.bcrypt_cost, 10);
        assert!(!settings.observability.prometheus_enabled);
        assert!(
            settings
                .cors
                .allowed_origins
                .contains(&HeaderValue::from_static("https://game.example.com"))
        );
        assert!(
            !settings
                .cors
                .allowed_origins
                .contains(&HeaderValue::from_static("https://evil.example.com"))
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        assert!(matches!(from_json("{}"), Err(SettingsError::Load(_))));
    }

    #[test]
    fn test_rejects_non_positive_token_ttl() {
        let result = from_json(
            r#"{
                "database": { "url": "postgres://db/warfront" },
                "auth": { "jwt": { "access_token_expire_minutes": 0 } }
            }"#,
        );
        assert!(matches!(
            result,
            Err(SettingsError::Invalid {
                key: "auth.jwt.access_token_expire_minutes",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_bcrypt_cost() {
        let result = from_json(
            r#"{
                "database": { "url": "postgres://db/warfront" },
                "auth": { "hashing": { "bcrypt_cost": 40 } }
            }"#,
        );
        assert!(matches!(
            result,
            Err(SettingsError::Invalid {
                key: "auth.hashing.bcrypt_cost",
                ..
            })
        ));
    }

    #[test]
    fn test_environment_from_env_value() {
        assert_eq!(Environment::from_env_value(None).unwrap(), Environment::Development);
        assert_eq!(
            Environment::from_env_value(Some("Production".to_string())).unwrap(),
            Environment::Production
        );
        assert_eq!(
            Environment::from_env_value(Some("staging".to_string())).unwrap(),
            Environment::Staging
        );
        assert!(matches!(
            Environment::from_env_value(Some("qa".to_string())),
            Err(SettingsError::Invalid {
                key: "application.environment",
                ..
            })
        ));
    }

    #[test]
    fn test_selected_environment_wins_over_files() {
        let builder = layered_builder(Path::new("no-such-config-dir"), Environment::Staging)
            .unwrap()
            .add_source(File::from_str(
                r#"{
                    "application": { "environment": "production" },
                    "database": { "url": "postgres://db/warfront" }
                }"#,
                FileFormat::Json,
            ));

        let settings = Settings::build(builder).unwrap();
        assert_eq!(settings.application.environment, Environment::Staging);
    }
}
