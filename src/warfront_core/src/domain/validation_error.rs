use thiserror::Error;

/// Reasons a raw identity string is rejected by its value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username must be between 3 and 30 characters")]
    UsernameLength,
    #[error("Username can only contain letters, numbers, underscores, and hyphens")]
    UsernameCharacters,
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Invalid email format")]
    InvalidEmailFormat,
}
