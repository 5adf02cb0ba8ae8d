pub mod env {
    pub const ENV_PREFIX: &str = "WARFRONT";
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "WARFRONT_APPLICATION__ENVIRONMENT";
    pub const CONFIG_DIR_ENV_VAR: &str = "WARFRONT_CONFIG_DIR";
}

pub const DEFAULT_CONFIG_DIR: &str = "configuration";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Longest deliverable address (RFC 5321 path limit minus the brackets).
pub const MAX_EMAIL_LENGTH: usize = 254;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:8000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing";
    pub const BCRYPT_COST: u32 = 4;
}
