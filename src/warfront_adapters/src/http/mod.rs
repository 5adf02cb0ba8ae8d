pub mod routes;

pub use routes::{REGISTRATIONS_TOTAL, RegisterApiError, healthz, readyz, register};
