//! Core analysis: outlier detection, reconciliation and alert text

pub mod format;
pub mod outlier;
pub mod reconcile;

pub use format::{format_anomalies, format_discrepancy};
pub use outlier::{Fences, OutlierDetector, FENCE_MULTIPLIER};
pub use reconcile::{previous_day, reconcile};
