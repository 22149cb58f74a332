use anyhow::Context;
use axum::{http::StatusCode, routing::get, Router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use weatherlog::config::Config;
use weatherlog::render::Renderer;
use weatherlog::rest::{self, AppState};
use weatherlog::{db, metrics, validate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    validate::validate(&config).context("invalid configuration")?;

    info!("Starting weather log viewer");
    info!("HTTP server: {}", config.http_addr);
    info!(
        "Page size: {}, navbar: {}",
        config.page.page_size, config.page.show_navbar
    );

    metrics::init_metrics().context("failed to register metrics")?;

    let pool = db::make_pool(&config.database);
    let renderer = Renderer::new(&config.page).context("failed to compile page template")?;
    let state = AppState::new(pool, &config.database.table, config.page.page_size, renderer);

    // Build HTTP app with the log page and metrics endpoint
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .merge(rest::create_router(state));

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.http_addr))?;

    info!("HTTP server listening on {}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

async fn metrics_handler() -> Result<String, (StatusCode, String)> {
    metrics::gather_metrics().map_err(|e| {
        error!("Failed to encode metrics: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}
