use anyhow::{Context, Result};
use link_explorer::{app_state::AppState, config::Config, logging, router::build_router};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::from_config(&config)?;
    info!(
        versions = ?state.models.versions(),
        store = %config.feedback_store_path().display(),
        "model registry ready"
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
