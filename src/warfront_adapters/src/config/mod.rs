pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, ApplicationSettings, Argon2Settings, AuthSettings, CorsSettings,
    DatabaseSettings, Environment, HashScheme, HashingSettings, JwtSettings, ObservabilitySettings,
    Settings, SettingsError,
};
