use bfhl_service::config::BfhlConfig;
use bfhl_service::services::metrics::init_metrics;
use bfhl_service::startup::Application;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded first so `.env` can also supply RUST_LOG and OTLP_ENDPOINT
    let config = BfhlConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing("bfhl-service", "info", config.otlp_endpoint.as_deref());

    if let Err(e) = init_metrics() {
        tracing::warn!("Failed to initialize metrics: {}", e);
    }

    let app = Application::build(config).await?;
    let result = app.run_until_stopped().await;

    shutdown_tracing();
    Ok(result?)
}
