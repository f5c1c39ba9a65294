//! Alert text rendering

use crate::types::{AnomalyRecord, DiscrepancyResult};

const ANOMALY_HEADER: &str = "Anomalies detected in order counts:";

/// Render anomalies as a header plus one line per record.
///
/// Returns `None` for an empty slice; no notification should be sent then.
pub fn format_anomalies(anomalies: &[AnomalyRecord]) -> Option<String> {
    if anomalies.is_empty() {
        return None;
    }

    let mut message = String::from(ANOMALY_HEADER);
    message.push('\n');
    for anomaly in anomalies {
        message.push_str(&format!(
            "Day: {}, Hour: {}, Order Count: {}\n",
            anomaly.day_of_week, anomaly.hour_of_day, anomaly.count
        ));
    }
    Some(message)
}

/// Render a discrepancy as a single line. Always produced.
pub fn format_discrepancy(result: &DiscrepancyResult) -> String {
    format!(
        "Discrepancy between {} and {} sales for {}: {}",
        result.primary.source,
        result.secondary.source,
        result.as_of.format("%Y-%m-%d"),
        result.discrepancy
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::reconcile::reconcile;
    use crate::types::{AggregateValue, Observation};
    use chrono::NaiveDate;

    #[test]
    fn test_format_anomalies() {
        let anomalies = vec![Observation::new(1, 12, 9999), Observation::new(5, 3, 0)];
        let message = format_anomalies(&anomalies).unwrap();
        assert_eq!(
            message,
            "Anomalies detected in order counts:\n\
             Day: 1, Hour: 12, Order Count: 9999\n\
             Day: 5, Hour: 3, Order Count: 0\n"
        );
    }

    #[test]
    fn test_format_anomalies_empty_is_none() {
        assert!(format_anomalies(&[]).is_none());
    }

    #[test]
    fn test_format_discrepancy() {
        let result = reconcile(
            AggregateValue::new("RDS", 15200),
            AggregateValue::new("Redshift", 15000),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        assert_eq!(
            format_discrepancy(&result),
            "Discrepancy between RDS and Redshift sales for 2024-05-01: 200"
        );
    }

    #[test]
    fn test_format_zero_and_negative_discrepancy() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let zero = reconcile(AggregateValue::new("A", 0), AggregateValue::new("B", 0), date);
        assert!(format_discrepancy(&zero).ends_with("2024-01-09: 0"));

        let negative = reconcile(AggregateValue::new("A", 1), AggregateValue::new("B", 4), date);
        assert!(format_discrepancy(&negative).ends_with(": -3"));
    }
}
