//! End-to-end runs of both jobs against in-memory stores and sinks.

use async_trait::async_trait;
use chrono::NaiveDate;
use order_alerts::{
    notifier::Notifier,
    sources::{AggregateSource, GroupedCountSource},
    types::{AlertKind, AlertMessage, Observation, ObservationSet},
    AlertError, AnomalyJob, Pipeline, ReconciliationJob, RunMetrics, RunOutcome,
};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct FixedCounts(ObservationSet);

#[async_trait]
impl GroupedCountSource for FixedCounts {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_counts(&self) -> order_alerts::Result<ObservationSet> {
        Ok(self.0.clone())
    }
}

struct DownStore;

#[async_trait]
impl GroupedCountSource for DownStore {
    fn name(&self) -> &str {
        "down"
    }

    async fn fetch_counts(&self) -> order_alerts::Result<ObservationSet> {
        Err(AlertError::source_unavailable("down", "connection refused"))
    }
}

#[async_trait]
impl AggregateSource for DownStore {
    fn name(&self) -> &str {
        "down"
    }

    async fn fetch_aggregate(&self, _date: NaiveDate) -> order_alerts::Result<i64> {
        Err(AlertError::source_unavailable("down", "connection refused"))
    }
}

struct SlowStore;

#[async_trait]
impl GroupedCountSource for SlowStore {
    fn name(&self) -> &str {
        "slow"
    }

    async fn fetch_counts(&self) -> order_alerts::Result<ObservationSet> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![Observation::new(0, 0, 1)])
    }
}

struct FixedAggregate {
    name: &'static str,
    value: i64,
}

#[async_trait]
impl AggregateSource for FixedAggregate {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch_aggregate(&self, _date: NaiveDate) -> order_alerts::Result<i64> {
        Ok(self.value)
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<AlertMessage>>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<AlertMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, alert: &AlertMessage) -> order_alerts::Result<()> {
        self.sent.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn send(&self, _alert: &AlertMessage) -> order_alerts::Result<()> {
        Err(AlertError::notification_failure("failing", "invalid_auth"))
    }
}

fn pipeline(notifier: impl Notifier + 'static) -> Pipeline {
    Pipeline::new(
        Box::new(notifier),
        Duration::from_secs(60),
        Arc::new(RunMetrics::new()),
    )
}

fn may_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

#[tokio::test]
async fn test_spike_is_reported() {
    let notifier = RecordingNotifier::default();
    let pipeline = pipeline(notifier.clone());
    let job = AnomalyJob::new(FixedCounts(vec![
        Observation::new(1, 9, 100),
        Observation::new(1, 10, 110),
        Observation::new(1, 11, 105),
        Observation::new(1, 12, 9999),
    ]));

    let outcome = pipeline.run(&job).await;

    assert_eq!(outcome, RunOutcome::Notified);
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, AlertKind::Anomaly);
    assert_eq!(
        messages[0].text,
        "Anomalies detected in order counts:\nDay: 1, Hour: 12, Order Count: 9999\n"
    );
    assert_eq!(pipeline.metrics().findings.load(Ordering::Relaxed), 1);
    assert_eq!(pipeline.metrics().rows_fetched.load(Ordering::Relaxed), 4);
}

#[tokio::test]
async fn test_constant_counts_send_nothing() {
    let notifier = RecordingNotifier::default();
    let pipeline = pipeline(notifier.clone());
    let counts = (0..24).map(|h| Observation::new(2, h, 50)).collect();

    let outcome = pipeline.run(&AnomalyJob::new(FixedCounts(counts))).await;

    assert_eq!(outcome, RunOutcome::Suppressed);
    assert!(notifier.messages().is_empty());
    assert_eq!(pipeline.metrics().notifications_sent.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_empty_counts_skip_analysis() {
    let notifier = RecordingNotifier::default();
    let pipeline = pipeline(notifier.clone());

    let outcome = pipeline.run(&AnomalyJob::new(FixedCounts(Vec::new()))).await;

    assert_eq!(outcome, RunOutcome::NoData);
    assert!(notifier.messages().is_empty());
    assert!(pipeline.metrics().stage_time("analyze").is_none());
}

#[tokio::test]
async fn test_unavailable_source_sends_nothing() {
    let notifier = RecordingNotifier::default();
    let pipeline = pipeline(notifier.clone());

    let outcome = pipeline.run(&AnomalyJob::new(DownStore)).await;

    assert_eq!(outcome, RunOutcome::SourceUnavailable);
    assert!(notifier.messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_fetch_deadline_counts_as_unavailable() {
    let notifier = RecordingNotifier::default();
    let pipeline = Pipeline::new(
        Box::new(notifier.clone()),
        Duration::from_secs(5),
        Arc::new(RunMetrics::new()),
    );

    let outcome = pipeline.run(&AnomalyJob::new(SlowStore)).await;

    assert_eq!(outcome, RunOutcome::SourceUnavailable);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_small_discrepancy_is_reported() {
    let notifier = RecordingNotifier::default();
    let pipeline = pipeline(notifier.clone());
    let job = ReconciliationJob::new(
        FixedAggregate {
            name: "RDS",
            value: 15200,
        },
        FixedAggregate {
            name: "Redshift",
            value: 15000,
        },
        may_first(),
    );

    let outcome = pipeline.run(&job).await;

    assert_eq!(outcome, RunOutcome::Notified);
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, AlertKind::Discrepancy);
    assert_eq!(
        messages[0].text,
        "Discrepancy between RDS and Redshift sales for 2024-05-01: 200"
    );
}

#[tokio::test]
async fn test_zero_discrepancy_is_still_reported() {
    let notifier = RecordingNotifier::default();
    let pipeline = pipeline(notifier.clone());
    let job = ReconciliationJob::new(
        FixedAggregate {
            name: "RDS",
            value: 0,
        },
        FixedAggregate {
            name: "Redshift",
            value: 0,
        },
        may_first(),
    );

    let outcome = pipeline.run(&job).await;

    assert_eq!(outcome, RunOutcome::Notified);
    assert_eq!(
        notifier.messages()[0].text,
        "Discrepancy between RDS and Redshift sales for 2024-05-01: 0"
    );
}

#[tokio::test]
async fn test_one_store_down_skips_reconciliation() {
    let notifier = RecordingNotifier::default();
    let pipeline = pipeline(notifier.clone());
    let job = ReconciliationJob::new(
        FixedAggregate {
            name: "RDS",
            value: 120,
        },
        DownStore,
        may_first(),
    );

    let outcome = pipeline.run(&job).await;

    assert_eq!(outcome, RunOutcome::SourceUnavailable);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_notification_failure_is_not_fatal() {
    let pipeline = pipeline(FailingNotifier);
    let job = ReconciliationJob::new(
        FixedAggregate {
            name: "RDS",
            value: 1,
        },
        FixedAggregate {
            name: "Redshift",
            value: 2,
        },
        may_first(),
    );

    let outcome = pipeline.run(&job).await;

    assert_eq!(outcome, RunOutcome::NotificationFailed);
    assert_eq!(pipeline.metrics().notifications_failed.load(Ordering::Relaxed), 1);
    assert!(pipeline.metrics().stage_time("report").is_some());
}
