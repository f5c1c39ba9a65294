//! NATS sink publishing JSON alert envelopes

use super::Notifier;
use crate::error::{AlertError, Result};
use crate::types::AlertMessage;
use async_trait::async_trait;
use tracing::debug;

/// Publishes alerts to a NATS subject
#[derive(Debug, Clone)]
pub struct NatsNotifier {
    url: String,
    subject: String,
}

impl NatsNotifier {
    /// Create a new alert publisher. The connection is opened on send.
    pub fn new(url: &str, subject: &str) -> Self {
        Self {
            url: url.to_string(),
            subject: subject.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for NatsNotifier {
    fn name(&self) -> &str {
        "nats"
    }

    async fn send(&self, alert: &AlertMessage) -> Result<()> {
        let payload = serde_json::to_vec(alert)
            .map_err(|e| AlertError::notification_failure(self.name(), e))?;

        let client = async_nats::connect(self.url.as_str())
            .await
            .map_err(|e| AlertError::notification_failure(self.name(), e))?;

        client
            .publish(self.subject.clone(), payload.into())
            .await
            .map_err(|e| AlertError::notification_failure(self.name(), e))?;

        // publish only buffers; flush before the process exits
        client
            .flush()
            .await
            .map_err(|e| AlertError::notification_failure(self.name(), e))?;

        debug!(
            alert_id = %alert.alert_id,
            subject = %self.subject,
            "Published alert"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Publishing requires a running NATS server
}
