pub mod error;
pub mod health;
pub mod register;

pub use error::{ErrorResponse, RegisterApiError};
pub use health::{healthz, readyz};
pub use register::{
    AccountResponse, REGISTRATIONS_TOTAL, RegisterRequest, RegisterResponse, register,
};
