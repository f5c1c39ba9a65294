//! Order-count anomaly alert
//!
//! Fetches hourly order counts from the warehouse, flags buckets outside the
//! Tukey fences and notifies only when something was flagged.

use anyhow::Result;
use order_alerts::{
    config::AppConfig, notifier, sources::RedshiftStore, telemetry, AnomalyJob, Pipeline,
    RunMetrics,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;

    info!("Script started");
    info!(
        warehouse = %config.stores.redshift.host,
        sink = ?config.notifier.kind,
        timeout_secs = config.pipeline.timeout_secs,
        "Configuration loaded"
    );

    let metrics = Arc::new(RunMetrics::new());
    let pipeline = Pipeline::new(
        notifier::from_config(&config.notifier),
        Duration::from_secs(config.pipeline.timeout_secs),
        metrics.clone(),
    );

    let job = AnomalyJob::new(RedshiftStore::new(&config.stores.redshift));
    let outcome = pipeline.run(&job).await;

    metrics.print_summary("anomaly");
    info!(%outcome, "Script finished");
    Ok(())
}
