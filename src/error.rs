//! Error types for the alerting pipelines

use thiserror::Error;

/// Failures raised while fetching, analyzing or reporting a metric.
#[derive(Debug, Error)]
pub enum AlertError {
    /// A store could not be reached or its query failed
    #[error("Source unavailable: {source_name} - {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// The outlier detector was handed zero observations
    #[error("Empty input: outlier detection requires at least one observation")]
    EmptyInput,

    /// A fetched row does not describe a valid observation
    #[error("Invalid observation: {field} = {value}")]
    InvalidObservation { field: &'static str, value: i64 },

    /// A sink could not deliver the message
    #[error("Notification failure: {sink} - {reason}")]
    NotificationFailure { sink: String, reason: String },

    /// A pipeline step exceeded its deadline
    #[error("Timeout: {step} exceeded {secs}s")]
    Timeout { step: &'static str, secs: u64 },
}

impl AlertError {
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        AlertError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn notification_failure(sink: impl Into<String>, reason: impl ToString) -> Self {
        AlertError::NotificationFailure {
            sink: sink.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for alerting operations.
pub type Result<T> = std::result::Result<T, AlertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_display() {
        let error = AlertError::source_unavailable("redshift", "connection refused");
        assert_eq!(
            error.to_string(),
            "Source unavailable: redshift - connection refused"
        );
    }

    #[test]
    fn test_invalid_observation_display() {
        let error = AlertError::InvalidObservation {
            field: "hour_of_day",
            value: 24,
        };
        assert_eq!(error.to_string(), "Invalid observation: hour_of_day = 24");
    }

    #[test]
    fn test_notification_failure_display() {
        let error = AlertError::notification_failure("slack", "channel_not_found");
        assert_eq!(
            error.to_string(),
            "Notification failure: slack - channel_not_found"
        );
    }

    #[test]
    fn test_timeout_display() {
        let error = AlertError::Timeout {
            step: "fetch",
            secs: 60,
        };
        assert_eq!(error.to_string(), "Timeout: fetch exceeded 60s");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AlertError>();
    }
}
