use k8s_demo::{server, shutdown, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    tracing::info!("k8s-demo starting");
    tracing::info!("Port: {}", config.port);
    tracing::info!("Downstream URL: {}", config.downstream_url);
    tracing::info!("Downstream timeout: {}ms", config.downstream_timeout_ms);
    if config.allow_ready_toggle {
        tracing::warn!("POST /toggle-ready is enabled; set ALLOW_READY_TOGGLE=false to disable it");
    }

    // Create application state
    let state = AppState::from_config(&config)?;

    // Build HTTP server
    let app = server::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}
