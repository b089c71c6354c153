//! Volunteer Hub backend
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use volunteer_hub::{
    config::Settings,
    database::{self, DatabaseService},
    handlers,
    services::{JwtVerifier, ServiceFactory},
    state::AppState,
    utils::logging,
};

const RESET_DB_FLAG: &str = "--reset-db";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging).context("failed to initialize logging")?;

    info!("Starting {} ({})...", settings.app.name, volunteer_hub::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = database::DatabaseConfig::from(&settings.database);
    let db_pool = database::create_pool(&db_config)
        .await
        .context("failed to connect to database")?;

    if std::env::args().any(|arg| arg == RESET_DB_FLAG) {
        database::reset_database(&db_pool).await.context("failed to reset database")?;
        info!("Database reset complete");
        return Ok(());
    }

    // Run database migrations
    database::run_migrations(&db_pool).await.context("failed to run migrations")?;

    let verifier = JwtVerifier::new(&settings.auth);
    if !verifier.verifies_signatures() {
        warn!("No token issuer configured: bearer tokens are NOT verified (development mode)");
    }

    // Initialize services
    let services = ServiceFactory::new(DatabaseService::new(db_pool));
    let state = AppState::new(services, Arc::new(verifier));
    let app = handlers::router(state, &settings.server.cors_origins);

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(address = %address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("{} has been shut down.", settings.app.name);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
