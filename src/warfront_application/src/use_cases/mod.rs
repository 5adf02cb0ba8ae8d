pub mod register_account;

// Re-export for convenience
pub use register_account::{DuplicateAccountError, RegisterAccountUseCase, RegisterError};
