//! Data source adapters for the two stores

pub mod rds;
pub mod redshift;

use crate::error::Result;
use crate::types::ObservationSet;
use async_trait::async_trait;
use chrono::NaiveDate;

pub use rds::RdsStore;
pub use redshift::RedshiftStore;

/// Source of hourly order counts grouped by day of week and hour.
#[async_trait]
pub trait GroupedCountSource: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Fetch one observation per (day, hour) pair that has orders.
    async fn fetch_counts(&self) -> Result<ObservationSet>;
}

/// Source of a single daily aggregate.
#[async_trait]
pub trait AggregateSource: Send + Sync {
    /// Name used in logs, errors and alert text
    fn name(&self) -> &str;

    /// Fetch the aggregate for `date`, 0 when the store has no rows for it.
    async fn fetch_aggregate(&self, date: NaiveDate) -> Result<i64>;
}

/// Coerce a nullable average into the integer the reconciler compares.
///
/// Truncates toward zero; `None` (no matching rows) becomes 0.
pub fn coerce_aggregate(value: Option<f64>) -> i64 {
    value.map(|v| v.trunc() as i64).unwrap_or(0)
}
