//! Log-only sink for dry runs

use super::Notifier;
use crate::error::Result;
use crate::types::AlertMessage;
use async_trait::async_trait;
use tracing::info;

/// Writes alerts to the log instead of a channel
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, alert: &AlertMessage) -> Result<()> {
        info!(
            alert_id = %alert.alert_id,
            kind = ?alert.kind,
            "Alert:\n{}",
            alert.text
        );
        Ok(())
    }
}
