use anyhow::{Context, Result};

use blueprint_infra::{AppConfig, bootstrap};

#[tokio::main]
async fn main() -> Result<()> {
    blueprint_observability::init();

    let config = AppConfig::from_env()?;
    let (services, runtime) = bootstrap(&config)?;
    let app = blueprint_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Background threads are joined off the async runtime.
    tokio::task::spawn_blocking(move || runtime.shutdown())
        .await
        .context("runtime shutdown panicked")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
