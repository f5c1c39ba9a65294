//! Daily sales discrepancy alert
//!
//! Compares yesterday's sales aggregate between RDS (primary) and Redshift
//! (secondary) and always reports the signed difference.

use anyhow::Result;
use chrono::Local;
use order_alerts::{
    analysis::previous_day,
    config::AppConfig,
    notifier,
    sources::{RdsStore, RedshiftStore},
    telemetry, Pipeline, ReconciliationJob, RunMetrics,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;

    let as_of = previous_day(Local::now().date_naive());
    info!(%as_of, "Script started");

    let metrics = Arc::new(RunMetrics::new());
    let pipeline = Pipeline::new(
        notifier::from_config(&config.notifier),
        Duration::from_secs(config.pipeline.timeout_secs),
        metrics.clone(),
    );

    let job = ReconciliationJob::new(
        RdsStore::new(&config.stores.rds),
        RedshiftStore::new(&config.stores.redshift),
        as_of,
    );
    let outcome = pipeline.run(&job).await;

    metrics.print_summary("reconciliation");
    info!(%outcome, "Script finished");
    Ok(())
}
