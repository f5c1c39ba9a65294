//! Slack sink using the Web API `chat.postMessage` method

use super::Notifier;
use crate::config::SlackConfig;
use crate::error::{AlertError, Result};
use crate::types::AlertMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<PostedMessage>,
}

#[derive(Debug, Deserialize)]
struct PostedMessage {
    #[serde(default)]
    text: String,
}

/// Posts alert text to a Slack channel
pub struct SlackNotifier {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    channel: String,
}

impl SlackNotifier {
    pub fn new(config: &SlackConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat.postMessage", config.api_url.trim_end_matches('/')),
            token: config.token.clone(),
            channel: config.channel.clone(),
        }
    }

    fn check_response(&self, response: PostMessageResponse, sent: &str) -> Result<()> {
        if !response.ok {
            let code = response.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(AlertError::notification_failure(self.name(), code));
        }

        if let Some(posted) = response.message {
            if posted.text != sent {
                warn!(channel = %self.channel, "Slack echoed different message text");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    fn name(&self) -> &str {
        "slack"
    }

    async fn send(&self, alert: &AlertMessage) -> Result<()> {
        let body = PostMessage {
            channel: &self.channel,
            text: &alert.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AlertError::notification_failure(self.name(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::notification_failure(
                self.name(),
                format!("HTTP {}", status),
            ));
        }

        let parsed: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| AlertError::notification_failure(self.name(), e))?;
        self.check_response(parsed, &alert.text)?;

        debug!(alert_id = %alert.alert_id, channel = %self.channel, "Posted alert to Slack");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn notifier() -> SlackNotifier {
        let mut config = AppConfig::default().notifier.slack;
        config.api_url = "https://slack.example/api/".to_string();
        config.channel = "C123".to_string();
        SlackNotifier::new(&config)
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(notifier().endpoint, "https://slack.example/api/chat.postMessage");
    }

    #[test]
    fn test_ok_response_is_delivered() {
        let response: PostMessageResponse =
            serde_json::from_str(r#"{"ok":true,"channel":"C123","message":{"text":"hi"}}"#)
                .unwrap();
        assert!(notifier().check_response(response, "hi").is_ok());
    }

    #[test]
    fn test_error_response_is_failure() {
        let response: PostMessageResponse =
            serde_json::from_str(r#"{"ok":false,"error":"channel_not_found"}"#).unwrap();
        let err = notifier().check_response(response, "hi").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Notification failure: slack - channel_not_found"
        );
    }

    #[test]
    fn test_post_body_shape() {
        let body = PostMessage {
            channel: "C123",
            text: "Discrepancy",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["channel"], "C123");
        assert_eq!(json["text"], "Discrepancy");
    }
}
