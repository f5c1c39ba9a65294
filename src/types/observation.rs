//! Hourly order-count observations

use crate::error::{AlertError, Result};
use serde::{Deserialize, Serialize};

/// Order count for one (day-of-week, hour-of-day) bucket.
///
/// Only buckets that actually contain orders exist; missing buckets are
/// never synthesized as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Day of week, 0 = Sunday
    pub day_of_week: u8,
    /// Hour of day, 0-23
    pub hour_of_day: u8,
    /// Number of orders in the bucket
    pub count: u64,
}

/// An observation the outlier detector flagged.
pub type AnomalyRecord = Observation;

/// Observations for one run, in source order.
pub type ObservationSet = Vec<Observation>;

impl Observation {
    pub fn new(day_of_week: u8, hour_of_day: u8, count: u64) -> Self {
        Self {
            day_of_week,
            hour_of_day,
            count,
        }
    }

    /// Validate a raw `(day_of_week, hour_of_day, count)` row from a store.
    pub fn from_row(day_of_week: i64, hour_of_day: i64, count: i64) -> Result<Self> {
        if !(0..=6).contains(&day_of_week) {
            return Err(AlertError::InvalidObservation {
                field: "day_of_week",
                value: day_of_week,
            });
        }
        if !(0..=23).contains(&hour_of_day) {
            return Err(AlertError::InvalidObservation {
                field: "hour_of_day",
                value: hour_of_day,
            });
        }
        if count < 0 {
            return Err(AlertError::InvalidObservation {
                field: "count",
                value: count,
            });
        }

        Ok(Self::new(day_of_week as u8, hour_of_day as u8, count as u64))
    }
}
