//! Cross-store reconciliation

use crate::types::{AggregateValue, DiscrepancyResult};
use chrono::{Duration, NaiveDate};

/// Compare the same metric computed by two stores for `as_of`.
///
/// No tolerance is applied: every comparison produces a result, and every
/// result is reported, including a zero discrepancy.
pub fn reconcile(
    primary: AggregateValue,
    secondary: AggregateValue,
    as_of: NaiveDate,
) -> DiscrepancyResult {
    let discrepancy = primary.value - secondary.value;
    DiscrepancyResult {
        as_of,
        primary,
        secondary,
        discrepancy,
    }
}

/// The calendar day before `today`.
pub fn previous_day(today: NaiveDate) -> NaiveDate {
    today - Duration::days(1)
}
