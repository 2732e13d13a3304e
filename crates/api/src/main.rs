//! Heart Risk Predictor - Main Entry Point

use anyhow::{anyhow, Context, Result};
use api::{build_state, init_logging, run_server, AppConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging).map_err(|e| anyhow!(e))?;

    info!("=== Heart Risk Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    let metrics = if config.metrics.enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    // Artifacts load before the listener binds; any failure aborts here
    let state = build_state(&config, metrics).context("Failed to load model artifacts")?;

    run_server(&config.server.bind_addr, state)
        .await
        .with_context(|| format!("Server on {} failed", config.server.bind_addr))?;

    Ok(())
}
