use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use warfront_adapters::{
    JwtTokenService,
    config::AllowedOrigins,
    http::{healthz, readyz, register},
};
use warfront_core::{AccountStore, CredentialHasher};

use crate::{
    metrics::render_metrics,
    telemetry::{make_span_with_request_id, on_request, on_response},
};

/// HTTP front of the player registration flow
pub struct RegistrationService {
    router: Router,
}

impl RegistrationService {
    /// Create a new RegistrationService
    ///
    /// # Arguments
    /// * `account_store` - Store for accounts (must be Clone)
    /// * `hasher` - Credential hasher (must be Clone)
    /// * `token_service` - Issues the access token returned on registration
    /// * `api_prefix` - Path the API routes are mounted under, e.g. `/api/v1`
    pub fn new<S, H>(
        account_store: S,
        hasher: H,
        token_service: JwtTokenService,
        api_prefix: &str,
    ) -> Self
    where
        S: AccountStore + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
    {
        let api = Router::new()
            .route("/players/register", post(register::<S, H>))
            .with_state((account_store, hasher, token_service));

        let router = Router::new()
            .route("/healthz", get(healthz))
            .route("/readyz", get(readyz));

        let api_prefix = api_prefix.trim_end_matches('/');
        let router = if api_prefix.is_empty() {
            router.merge(api)
        } else {
            router.nest(api_prefix, api)
        };

        Self { router }
    }

    /// Serve the recorder behind `handle` on `GET /metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.router = self
            .router
            .route("/metrics", get(render_metrics).with_state(handle));
        self
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the RegistrationService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server until ctrl-c or SIGTERM
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Registration service listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
