//! Crew Management - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin crew-api
//!
//! # Run with environment variables
//! API_PORT=8080 DATABASE_URL=postgres://... API_STATUS_SERVICE_URL=http://... cargo run --bin crew-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` or `DATABASE_URL` - PostgreSQL connection string
//! * `API_STATUS_SERVICE_URL` - Base URL of the crew status service
//! * `API_STATUS_SERVICE_TIMEOUT_SECS` - Status service timeout (default: 30)
//! * `API_API_KEY` - Key required on `/api` routes (default: none)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::SystemDateProvider;
use domain_crew::{
    CrewMemberService, CrewMemberValidator, HttpStatusResolver, IsoCountryLookup,
    ReferenceDataService,
};
use infra_db::{
    create_pool, run_migrations, PostgresCrewMemberAdapter, PostgresLicenseAdapter,
    PostgresMemberTypeAdapter,
};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        status_service = %config.status_service_url,
        api_key_required = config.required_api_key().is_some(),
        "Starting crew management API server"
    );

    let pool = create_pool(config.database_config())
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let state = build_state(pool, config.clone())?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Builds the service graph on top of the pool
fn build_state(pool: infra_db::DatabasePool, config: ApiConfig) -> anyhow::Result<AppState> {
    let crew_members = Arc::new(PostgresCrewMemberAdapter::new(pool.clone()));
    let licenses = Arc::new(PostgresLicenseAdapter::new(pool.clone()));
    let member_types = Arc::new(PostgresMemberTypeAdapter::new(pool));
    let countries = Arc::new(IsoCountryLookup::new());

    let status_resolver = HttpStatusResolver::new(config.status_service_config())
        .context("Failed to build status service client")?;

    let validator = CrewMemberValidator::new(countries.clone(), Arc::new(SystemDateProvider));

    let crew_service = CrewMemberService::new(
        crew_members.clone(),
        licenses.clone(),
        member_types.clone(),
        Arc::new(status_resolver),
        validator,
    );
    let reference_service = ReferenceDataService::new(licenses, member_types, countries);

    Ok(AppState {
        crew_service: Arc::new(crew_service),
        reference_service: Arc::new(reference_service),
        health: crew_members,
        config,
    })
}

/// Initializes the tracing subscriber for structured logging
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_target(true)))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
