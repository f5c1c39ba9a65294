//! Daily sales reconciliation job

use super::{Analysis, Job};
use crate::analysis::{format_discrepancy, reconcile};
use crate::error::Result;
use crate::sources::AggregateSource;
use crate::types::{AggregateValue, AlertKind, AlertMessage};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

/// Compares one day's aggregate between a primary and a secondary store.
///
/// The discrepancy is reported on every run, zero included.
pub struct ReconciliationJob<P, S> {
    primary: P,
    secondary: S,
    as_of: NaiveDate,
}

impl<P: AggregateSource, S: AggregateSource> ReconciliationJob<P, S> {
    pub fn new(primary: P, secondary: S, as_of: NaiveDate) -> Self {
        Self {
            primary,
            secondary,
            as_of,
        }
    }
}

#[async_trait]
impl<P: AggregateSource, S: AggregateSource> Job for ReconciliationJob<P, S> {
    type Data = (AggregateValue, AggregateValue);

    fn name(&self) -> &str {
        "reconciliation"
    }

    async fn fetch(&self) -> Result<Self::Data> {
        let primary = self.primary.fetch_aggregate(self.as_of).await?;
        let secondary = self.secondary.fetch_aggregate(self.as_of).await?;
        Ok((
            AggregateValue::new(self.primary.name(), primary),
            AggregateValue::new(self.secondary.name(), secondary),
        ))
    }

    fn size(_data: &Self::Data) -> usize {
        2
    }

    fn analyze(&self, (primary, secondary): Self::Data) -> Result<Analysis> {
        let result = reconcile(primary, secondary, self.as_of);

        info!(
            as_of = %result.as_of,
            primary = result.primary.value,
            secondary = result.secondary.value,
            discrepancy = result.discrepancy,
            "Reconciliation complete"
        );

        Ok(Analysis {
            findings: 1,
            alert: Some(AlertMessage::new(
                AlertKind::Discrepancy,
                format_discrepancy(&result),
            )),
        })
    }
}
