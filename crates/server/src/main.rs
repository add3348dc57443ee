use anyhow::{Context, Result};
use blog_server::handler::AppRouter;
use shared::{
    config::{Config, ConnectionManager},
    state::AppState,
    utils::{Telemetry, init_logger},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("blog-server", config.otlp_endpoint.clone());
    let tracer_provider = telemetry
        .init_tracer()
        .context("Failed to initialize tracer provider")?;
    let meter_provider = telemetry
        .init_meter()
        .context("Failed to initialize meter provider")?;
    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize logger provider")?;

    init_logger(&logger_provider);

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.max_connections,
        config.run_migrations,
    )
    .await
    .context("Failed to initialize database pool")?;

    let state = AppState::new(db_pool).await;

    AppRouter::serve(config.port, state)
        .await
        .context("HTTP server failed")?;

    let mut shutdown_errors = Vec::new();

    if let Err(e) = tracer_provider.shutdown() {
        shutdown_errors.push(format!("tracer provider: {e}"));
    }
    if let Err(e) = meter_provider.shutdown() {
        shutdown_errors.push(format!("meter provider: {e}"));
    }
    if let Err(e) = logger_provider.shutdown() {
        shutdown_errors.push(format!("logger provider: {e}"));
    }

    if !shutdown_errors.is_empty() {
        anyhow::bail!(
            "Failed to shutdown providers:\n{}",
            shutdown_errors.join("\n")
        );
    }

    Ok(())
}
