pub mod account;
pub mod email;
pub mod faction;
pub mod username;
pub mod validation_error;
