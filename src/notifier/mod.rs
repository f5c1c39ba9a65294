//! Notification sinks for formatted alerts

pub mod log;
pub mod nats;
pub mod slack;

use crate::config::{NotifierConfig, NotifierKind};
use crate::error::Result;
use crate::types::AlertMessage;
use async_trait::async_trait;

pub use self::log::LogNotifier;
pub use self::nats::NatsNotifier;
pub use self::slack::SlackNotifier;

/// Delivers an alert to a channel. Failures are reported, never retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    async fn send(&self, alert: &AlertMessage) -> Result<()>;
}

/// Build the sink selected by `notifier.kind`.
pub fn from_config(config: &NotifierConfig) -> Box<dyn Notifier> {
    match config.kind {
        NotifierKind::Slack => Box::new(SlackNotifier::new(&config.slack)),
        NotifierKind::Nats => Box::new(NatsNotifier::new(&config.nats.url, &config.nats.subject)),
        NotifierKind::Log => Box::new(LogNotifier::new()),
    }
}
