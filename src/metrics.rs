//! Per-run statistics for the alerting pipelines.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for one process run
pub struct RunMetrics {
    /// Rows or values returned by the sources
    pub rows_fetched: AtomicU64,
    /// Anomalies or discrepancies produced by the analysis
    pub findings: AtomicU64,
    /// Alerts delivered
    pub notifications_sent: AtomicU64,
    /// Alerts the sink failed to deliver
    pub notifications_failed: AtomicU64,
    /// Stage durations in microseconds, in completion order
    stage_times: RwLock<Vec<(&'static str, u64)>>,
    /// Start time for total elapsed
    start_time: Instant,
}

impl RunMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            rows_fetched: AtomicU64::new(0),
            findings: AtomicU64::new(0),
            notifications_sent: AtomicU64::new(0),
            notifications_failed: AtomicU64::new(0),
            stage_times: RwLock::new(Vec::with_capacity(3)),
            start_time: Instant::now(),
        }
    }

    /// Record how long a stage took
    pub fn record_stage(&self, stage: &'static str, duration: Duration) {
        if let Ok(mut times) = self.stage_times.write() {
            times.push((stage, duration.as_micros() as u64));
        }
    }

    pub fn record_rows(&self, rows: usize) {
        self.rows_fetched.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn record_findings(&self, findings: usize) {
        self.findings.fetch_add(findings as u64, Ordering::Relaxed);
    }

    /// Record a delivery attempt
    pub fn record_notification(&self, delivered: bool) {
        if delivered {
            self.notifications_sent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.notifications_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Duration of a recorded stage, if it ran
    pub fn stage_time(&self, stage: &str) -> Option<Duration> {
        self.stage_times
            .read()
            .ok()?
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, us)| Duration::from_micros(*us))
    }

    /// Print summary statistics
    pub fn print_summary(&self, job: &str) {
        let rows = self.rows_fetched.load(Ordering::Relaxed);
        let findings = self.findings.load(Ordering::Relaxed);
        let sent = self.notifications_sent.load(Ordering::Relaxed);
        let failed = self.notifications_failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║ {:<60} ║", format!("{} - RUN SUMMARY", job.to_uppercase()));
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Rows Fetched: {:>8}  │  Findings: {:>8}                  ║", rows, findings);
        info!("║ Alerts Sent:  {:>8}  │  Failed:   {:>8}                  ║", sent, failed);
        info!("╠══════════════════════════════════════════════════════════════╣");
        if let Ok(times) = self.stage_times.read() {
            for (stage, us) in times.iter() {
                info!("║   {:10}: {:>12} μs                                 ║", stage, us);
            }
        }
        info!(
            "║ Total: {:>10.3} s                                           ║",
            elapsed.as_secs_f64()
        );
        info!("╚══════════════════════════════════════════════════════════════╝");
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
