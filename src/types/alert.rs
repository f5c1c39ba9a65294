//! Alert envelope handed to notification sinks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which analysis produced the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Anomaly,
    Discrepancy,
}

/// A formatted alert ready for delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertMessage {
    /// Unique alert identifier
    pub alert_id: String,

    /// Analysis that produced the alert
    pub kind: AlertKind,

    /// Human-readable message body
    pub text: String,

    /// Alert generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl AlertMessage {
    /// Create a new alert
    pub fn new(kind: AlertKind, text: String) -> Self {
        Self {
            alert_id: uuid::Uuid::new_v4().to_string(),
            kind,
            text,
            timestamp: Utc::now(),
        }
    }
}
