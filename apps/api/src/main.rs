use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "lendhub_api")
        .await
        .map_err(|e| eyre::eyre!("Database migration failed: {}", e))?;

    let state = AppState {
        config,
        db,
    };

    // Build router with API routes (repositories wired inside)
    let api_routes = api::routes(&state);

    // create_router adds docs and middleware to the composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints:
    // - /health: liveness with app name/version
    // - /ready: readiness with a database round-trip
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting lendhub API");

    // Graceful shutdown, then close the pool within the cleanup budget
    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("lendhub API shutdown complete");
    Ok(())
}
