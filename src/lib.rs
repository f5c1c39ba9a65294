//! Order Alerts Library
//!
//! Batch checks over order data held in two stores: IQR outlier detection
//! on hourly order counts, and reconciliation of daily sales aggregates
//! between the operational database and the analytics warehouse.

pub mod analysis;
pub mod config;
pub mod error;
pub mod metrics;
pub mod notifier;
pub mod pipeline;
pub mod sources;
pub mod telemetry;
pub mod types;

pub use analysis::OutlierDetector;
pub use config::AppConfig;
pub use error::{AlertError, Result};
pub use metrics::RunMetrics;
pub use pipeline::{AnomalyJob, Pipeline, ReconciliationJob, RunOutcome};
pub use types::{AggregateValue, AlertMessage, DiscrepancyResult, Observation};
