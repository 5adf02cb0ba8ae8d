mod registration_service;

pub mod helpers;
pub mod metrics;
pub mod telemetry;

pub use helpers::{get_postgres_pool, run_migrations};
pub use metrics::install_prometheus_recorder;
pub use registration_service::RegistrationService;
pub use telemetry::init_tracing;
