use color_eyre::eyre::Result;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use warfront_adapters::{
    ConfiguredHasher, JwtTokenService, PostgresAccountStore, config::Settings,
};
use warfront_service::{
    RegistrationService, get_postgres_pool, init_tracing, install_prometheus_recorder,
    run_migrations,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Load configuration
    let settings = Settings::load()?;
    init_tracing(&settings.application.log_level)?;

    tracing::info!(
        name = %settings.application.name,
        environment = ?settings.application.environment,
        "Application starting"
    );

    // Fail fast on a missing signing secret or bad hashing parameters
    let token_service = JwtTokenService::new(&settings.auth.jwt)?;
    let hasher = ConfiguredHasher::from_settings(&settings.auth.hashing)?;

    // Setup database connection pool
    let pg_pool = get_postgres_pool(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await?;

    // Run migrations
    run_migrations(&pg_pool).await?;

    let account_store = PostgresAccountStore::new(pg_pool);

    let mut service = RegistrationService::new(
        account_store,
        hasher,
        token_service,
        &settings.application.api_prefix,
    );

    if settings.observability.prometheus_enabled {
        service = service.with_metrics(install_prometheus_recorder()?);
    }

    let listener = TcpListener::bind(&settings.application.address).await?;

    service
        .run_standalone(listener, Some(settings.cors.allowed_origins.clone()))
        .await?;

    tracing::info!(name = %settings.application.name, "Application shut down");

    Ok(())
}
