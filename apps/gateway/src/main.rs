use axum::middleware;
use axum_helpers::errors::handlers::not_found;
use axum_helpers::server::{create_production_app, health_router};
use axum_helpers::security_headers;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

mod api;
mod client;
mod config;
mod error;

use client::ApiClient;
use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let api_client = ApiClient::new(config.api_base_url.clone())?;

    info!("Forwarding validated requests to {}", config.api_base_url);

    // The gateway exposes the public paths at the root; no docs UI here,
    // the core service carries the OpenAPI surface.
    let app = api::routes(api_client)
        .merge(health_router(config.app))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    info!("Starting lendhub gateway");

    create_production_app(app, &config.server, Duration::from_secs(10), async {})
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("lendhub gateway shutdown complete");
    Ok(())
}
