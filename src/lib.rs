//! # Warfront - Player Registration Backend
//!
//! This is a facade crate that re-exports all public APIs from the registration components.
//! Use this crate to get access to the whole registration flow in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warfront = { path = "../warfront" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `Email`, `Faction`, `Account`
//! - **Ports**: `AccountStore`, `CredentialHasher`
//! - **Use cases**: `RegisterAccountUseCase`
//! - **Adapters**: `PostgresAccountStore`, `HashMapAccountStore`, `BcryptCredentialHasher`, etc.
//! - **Service**: `RegistrationService` - The HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use warfront_core::*;
}

pub use warfront_core::{
    Account, AccountId, Email, Faction, ParseFactionError, StartingResources, Username,
    ValidationError,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use warfront_core::{AccountStore, AccountStoreError, CredentialHasher, HashingError};
}

pub use warfront_core::{AccountStore, AccountStoreError, CredentialHasher, HashingError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use warfront_application::*;
}

pub use warfront_application::{DuplicateAccountError, RegisterAccountUseCase, RegisterError};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use warfront_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use warfront_adapters::persistence::*;
    }

    /// Credential hashing schemes
    pub mod hashing {
        pub use warfront_adapters::hashing::*;
    }

    /// Access token issuing and verification
    pub mod token {
        pub use warfront_adapters::token::*;
    }

    /// Configuration
    pub mod config {
        pub use warfront_adapters::config::*;
    }
}

pub use warfront_adapters::{
    Argon2CredentialHasher, BcryptCredentialHasher, Claims, ConfiguredHasher,
    HashMapAccountStore, JwtTokenService, PostgresAccountStore, TokenConfigError, TokenError,
};

// ============================================================================
// Registration Service (Main Entry Point)
// ============================================================================

pub use warfront_service::{
    RegistrationService, get_postgres_pool, init_tracing, install_prometheus_recorder,
    run_migrations,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
