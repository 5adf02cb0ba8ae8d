pub mod use_cases;

pub use use_cases::register_account::{
    DuplicateAccountError, RegisterAccountUseCase, RegisterError,
};
