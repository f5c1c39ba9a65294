//! IQR outlier detection with Tukey fences.
//!
//! Hourly order counts are heavy-tailed (midnight vs. lunch peak), so the
//! fences come from quartiles rather than mean and standard deviation.

use crate::error::{AlertError, Result};
use crate::types::{AnomalyRecord, Observation};
use tracing::debug;

/// Tukey fence multiplier
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// Quartiles and fences computed over one observation set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    /// Compute fences over the counts of `observations`.
    pub fn compute(observations: &[Observation]) -> Result<Self> {
        if observations.is_empty() {
            return Err(AlertError::EmptyInput);
        }

        let mut sorted: Vec<f64> = observations.iter().map(|o| o.count as f64).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = percentile(&sorted, 25.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        Ok(Self {
            q1,
            q3,
            iqr,
            lower: q1 - FENCE_MULTIPLIER * iqr,
            upper: q3 + FENCE_MULTIPLIER * iqr,
        })
    }

    /// Whether a count falls outside the fences
    pub fn is_outlier(&self, count: u64) -> bool {
        let count = count as f64;
        count < self.lower || count > self.upper
    }
}

/// Flags observations whose counts fall outside the Tukey fences.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlierDetector;

impl OutlierDetector {
    pub fn new() -> Self {
        Self
    }

    /// Return the anomalous observations in input order.
    ///
    /// Fails with [`AlertError::EmptyInput`] on an empty set; callers are
    /// expected to check for data first.
    pub fn detect(&self, observations: &[Observation]) -> Result<Vec<AnomalyRecord>> {
        Ok(self.detect_with_fences(observations)?.1)
    }

    /// Like [`detect`](Self::detect), also returning the fences used.
    pub fn detect_with_fences(
        &self,
        observations: &[Observation],
    ) -> Result<(Fences, Vec<AnomalyRecord>)> {
        let fences = Fences::compute(observations)?;

        let anomalies: Vec<AnomalyRecord> = observations
            .iter()
            .filter(|o| fences.is_outlier(o.count))
            .copied()
            .collect();

        debug!(
            observations = observations.len(),
            q1 = fences.q1,
            q3 = fences.q3,
            lower = fences.lower,
            upper = fences.upper,
            anomalies = anomalies.len(),
            "Computed Tukey fences"
        );

        Ok((fences, anomalies))
    }
}

/// Percentile of sorted data using linear interpolation between the two
/// bracketing order statistics.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}
