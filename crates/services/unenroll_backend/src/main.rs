// File: services/unenroll_backend/src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use unenroll_backend::build_app;
use unenroll_common::{config_error, log_result, logging, Context, UnenrollError};
use unenroll_config::load_config;

#[tokio::main]
async fn main() -> Result<(), UnenrollError> {
    logging::init();

    let config = Arc::new(load_config().map_err(config_error)?);
    let app = log_result(
        build_app(config.clone()),
        "Router assembled",
        "Failed to assemble router",
    )?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);
    info!(
        "Apollo API key configured: {}",
        config.apollo.fallback_api_key().is_some()
    );
    info!(
        "Apollo campaign id: {}",
        config.apollo.fallback_campaign_id().unwrap_or("(not set)")
    );

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
