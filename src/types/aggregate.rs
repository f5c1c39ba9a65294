//! Daily aggregates and the discrepancy between two stores

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A summarized metric computed by one store for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateValue {
    /// Store that produced the value (e.g. "RDS")
    pub source: String,
    /// Integer value; 0 when the store had no rows for the date
    pub value: i64,
}

impl AggregateValue {
    pub fn new(source: impl Into<String>, value: i64) -> Self {
        Self {
            source: source.into(),
            value,
        }
    }
}

/// Signed difference `primary - secondary` for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyResult {
    pub as_of: NaiveDate,
    pub primary: AggregateValue,
    pub secondary: AggregateValue,
    pub discrepancy: i64,
}
