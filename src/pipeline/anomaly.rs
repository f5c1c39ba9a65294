//! Hourly order-count anomaly job

use super::{Analysis, Job};
use crate::analysis::{format_anomalies, OutlierDetector};
use crate::error::Result;
use crate::sources::GroupedCountSource;
use crate::types::{AlertKind, AlertMessage, ObservationSet};
use async_trait::async_trait;
use tracing::info;

/// Flags (day, hour) buckets whose order counts fall outside the Tukey fences
pub struct AnomalyJob<S> {
    source: S,
    detector: OutlierDetector,
}

impl<S: GroupedCountSource> AnomalyJob<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            detector: OutlierDetector::new(),
        }
    }
}

#[async_trait]
impl<S: GroupedCountSource> Job for AnomalyJob<S> {
    type Data = ObservationSet;

    fn name(&self) -> &str {
        "anomaly"
    }

    async fn fetch(&self) -> Result<ObservationSet> {
        self.source.fetch_counts().await
    }

    fn size(data: &ObservationSet) -> usize {
        data.len()
    }

    fn analyze(&self, data: ObservationSet) -> Result<Analysis> {
        let (fences, anomalies) = self.detector.detect_with_fences(&data)?;

        info!(
            source = %self.source.name(),
            observations = data.len(),
            q1 = fences.q1,
            q3 = fences.q3,
            lower = fences.lower,
            upper = fences.upper,
            anomalies = anomalies.len(),
            "Anomaly detection complete"
        );

        let alert =
            format_anomalies(&anomalies).map(|text| AlertMessage::new(AlertKind::Anomaly, text));
        Ok(Analysis {
            findings: anomalies.len(),
            alert,
        })
    }
}
