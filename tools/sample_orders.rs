//! Sample Order Generator
//!
//! Synthesizes a week of hourly order counts with injected spikes and runs
//! the anomaly job over them, printing the alert instead of sending it.

use async_trait::async_trait;
use order_alerts::{
    notifier::LogNotifier,
    sources::GroupedCountSource,
    types::{Observation, ObservationSet},
    AnomalyJob, Pipeline, RunMetrics,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Typical orders per hour, shaped around lunch and evening peaks
const HOURLY_PROFILE: [u64; 24] = [
    12, 8, 5, 4, 4, 6, 15, 30, 45, 55, 60, 70, 85, 80, 65, 60, 62, 70, 80, 75, 55, 40, 28, 18,
];

/// In-memory counts standing in for the warehouse
struct SyntheticOrders {
    observations: ObservationSet,
}

impl SyntheticOrders {
    fn generate(rng: &mut StdRng, spikes: usize) -> Self {
        let mut observations = Vec::with_capacity(7 * 24);

        for day in 0..7u8 {
            // weekends run lighter
            let weekday_factor = if day == 0 || day == 6 { 0.7 } else { 1.0 };
            for hour in 0..24u8 {
                let base = HOURLY_PROFILE[hour as usize] as f64 * weekday_factor;
                let noise = rng.gen_range(0.85..1.15);
                let count = (base * noise).round() as u64;
                // hours without orders never show up in the query result
                if count > 0 {
                    observations.push(Observation::new(day, hour, count));
                }
            }
        }

        for _ in 0..spikes {
            let idx = rng.gen_range(0..observations.len());
            observations[idx].count *= rng.gen_range(8..15);
            info!(
                day = observations[idx].day_of_week,
                hour = observations[idx].hour_of_day,
                count = observations[idx].count,
                "Injected spike"
            );
        }

        Self { observations }
    }
}

#[async_trait]
impl GroupedCountSource for SyntheticOrders {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn fetch_counts(&self) -> order_alerts::Result<ObservationSet> {
        Ok(self.observations.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse()?),
        )
        .init();

    info!("Starting Sample Order Generator");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let spikes: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(7);

    info!(spikes = spikes, seed = seed, "Configuration loaded");

    let mut rng = StdRng::seed_from_u64(seed);
    let source = SyntheticOrders::generate(&mut rng, spikes);
    info!(observations = source.observations.len(), "Generated hourly order counts");

    let metrics = Arc::new(RunMetrics::new());
    let pipeline = Pipeline::new(
        Box::new(LogNotifier::new()),
        Duration::from_secs(5),
        metrics.clone(),
    );

    let outcome = pipeline.run(&AnomalyJob::new(source)).await;

    metrics.print_summary("sample");
    info!(%outcome, "Completed");

    Ok(())
}
