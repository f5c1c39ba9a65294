//! Fetch → analyze → report pipeline shared by both alert jobs.
//!
//! A run fetches once, analyzes once and reports at most once. Every
//! failure ends the run at the step that produced it; nothing is retried.

pub mod anomaly;
pub mod reconciliation;

use crate::error::{AlertError, Result};
use crate::metrics::RunMetrics;
use crate::notifier::Notifier;
use crate::types::AlertMessage;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{error, info, warn};

pub use anomaly::AnomalyJob;
pub use reconciliation::ReconciliationJob;

/// Result of the analysis step
#[derive(Debug)]
pub struct Analysis {
    /// Number of anomalies or discrepancies found
    pub findings: usize,
    /// Alert to deliver; `None` suppresses notification
    pub alert: Option<AlertMessage>,
}

/// One metric check: how to fetch its data and how to analyze it.
#[async_trait]
pub trait Job: Send + Sync {
    type Data: Send;

    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Self::Data>;

    /// Number of records fetched; zero ends the run without analysis.
    fn size(data: &Self::Data) -> usize;

    fn analyze(&self, data: Self::Data) -> Result<Analysis>;
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A store could not be queried; nothing was analyzed
    SourceUnavailable,
    /// The store returned no records
    NoData,
    /// The analysis step rejected its input
    AnalysisFailed,
    /// Analysis found nothing worth reporting
    Suppressed,
    /// The alert was delivered
    Notified,
    /// The sink failed to deliver the alert
    NotificationFailed,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunOutcome::SourceUnavailable => "source unavailable",
            RunOutcome::NoData => "no data",
            RunOutcome::AnalysisFailed => "analysis failed",
            RunOutcome::Suppressed => "nothing to report",
            RunOutcome::Notified => "notified",
            RunOutcome::NotificationFailed => "notification failed",
        };
        f.write_str(s)
    }
}

/// Runs jobs against a notification sink
pub struct Pipeline {
    notifier: Box<dyn Notifier>,
    deadline: Duration,
    metrics: Arc<RunMetrics>,
}

impl Pipeline {
    pub fn new(notifier: Box<dyn Notifier>, deadline: Duration, metrics: Arc<RunMetrics>) -> Self {
        Self {
            notifier,
            deadline,
            metrics,
        }
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Run one fetch → analyze → report cycle.
    pub async fn run<J: Job>(&self, job: &J) -> RunOutcome {
        let job_name = job.name().to_string();
        info!(job = %job_name, "Run started");

        let fetch_start = Instant::now();
        let fetched = match timeout(self.deadline, job.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(AlertError::Timeout {
                step: "fetch",
                secs: self.deadline.as_secs(),
            }),
        };
        self.metrics.record_stage("fetch", fetch_start.elapsed());

        let data = match fetched {
            Ok(data) => data,
            Err(e) => {
                error!(job = %job_name, error = %e, "Fetch failed");
                return RunOutcome::SourceUnavailable;
            }
        };

        let size = J::size(&data);
        self.metrics.record_rows(size);
        if size == 0 {
            warn!(job = %job_name, "No data found");
            return RunOutcome::NoData;
        }

        let analyze_start = Instant::now();
        let analysis = job.analyze(data);
        self.metrics.record_stage("analyze", analyze_start.elapsed());

        let alert = match analysis {
            Ok(Analysis {
                findings,
                alert: Some(alert),
            }) => {
                self.metrics.record_findings(findings);
                alert
            }
            Ok(Analysis { findings, alert: None }) => {
                self.metrics.record_findings(findings);
                info!(job = %job_name, "Nothing to report");
                return RunOutcome::Suppressed;
            }
            Err(e) => {
                error!(job = %job_name, error = %e, "Analysis failed");
                return RunOutcome::AnalysisFailed;
            }
        };

        self.report(&job_name, &alert).await
    }

    async fn report(&self, job_name: &str, alert: &AlertMessage) -> RunOutcome {
        let report_start = Instant::now();
        let sent = match timeout(self.deadline, self.notifier.send(alert)).await {
            Ok(result) => result,
            Err(_) => Err(AlertError::Timeout {
                step: "report",
                secs: self.deadline.as_secs(),
            }),
        };
        self.metrics.record_stage("report", report_start.elapsed());

        match sent {
            Ok(()) => {
                self.metrics.record_notification(true);
                info!(
                    job = %job_name,
                    sink = %self.notifier.name(),
                    alert_id = %alert.alert_id,
                    "Notification sent"
                );
                RunOutcome::Notified
            }
            Err(e) => {
                self.metrics.record_notification(false);
                error!(
                    job = %job_name,
                    sink = %self.notifier.name(),
                    alert_id = %alert.alert_id,
                    error = %e,
                    "Notification failed"
                );
                RunOutcome::NotificationFailed
            }
        }
    }
}
