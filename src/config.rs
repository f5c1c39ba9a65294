//! Configuration management for the alerting pipelines

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the optional TOML config file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
/// Overrides the TOML config file location
pub const CONFIG_PATH_VAR: &str = "ALERTS_CONFIG";
/// Overrides the dotenv credentials file location
pub const ENV_FILE_VAR: &str = "ALERTS_ENV_FILE";
/// Prefix for environment overrides, e.g. `ALERTS__STORES__RDS__HOST`
pub const ENV_PREFIX: &str = "ALERTS";

/// Notification sink selection
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Slack `chat.postMessage`
    #[default]
    Slack,
    /// Publish JSON alerts to a NATS subject
    Nats,
    /// Write alerts to the log only
    Log,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub stores: StoresConfig,
    pub notifier: NotifierConfig,
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
}

/// Connection settings for both stores
#[derive(Debug, Clone, Deserialize)]
pub struct StoresConfig {
    /// Analytics warehouse (Postgres wire protocol)
    pub redshift: StoreConfig,
    /// Operational database (MySQL)
    pub rds: StoreConfig,
}

/// Connection settings for one store
#[derive(Clone, Deserialize)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Notification sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub kind: NotifierKind,
    pub slack: SlackConfig,
    pub nats: NatsConfig,
}

/// Slack Web API settings
#[derive(Clone, Deserialize)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`)
    #[serde(default)]
    pub token: String,
    /// Channel id or name
    #[serde(default)]
    pub channel: String,
    /// Web API base URL
    #[serde(default = "default_slack_api_url")]
    pub api_url: String,
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("token", &"<redacted>")
            .field("channel", &self.channel)
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn default_slack_api_url() -> String {
    "https://slack.com/api".to_string()
}

/// NATS connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NatsConfig {
    /// NATS server URL
    pub url: String,
    /// Subject for outgoing alerts
    pub subject: String,
}

/// Pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Deadline for the fetch and report steps, in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from defaults, the TOML file and the environment.
    ///
    /// A dotenv credentials file is read first so its variables take part
    /// in the environment layer.
    pub fn load() -> Result<Self> {
        load_env_file();
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from_path(path)
    }

    /// Load configuration with a specific (optional) TOML file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default("stores.redshift.host", defaults.stores.redshift.host)?
            .set_default("stores.redshift.port", defaults.stores.redshift.port as i64)?
            .set_default("stores.redshift.database", defaults.stores.redshift.database)?
            .set_default("stores.redshift.user", defaults.stores.redshift.user)?
            .set_default("stores.rds.host", defaults.stores.rds.host)?
            .set_default("stores.rds.port", defaults.stores.rds.port as i64)?
            .set_default("stores.rds.database", defaults.stores.rds.database)?
            .set_default("stores.rds.user", defaults.stores.rds.user)?
            .set_default("notifier.kind", "slack")?
            .set_default("notifier.slack.api_url", defaults.notifier.slack.api_url)?
            .set_default("notifier.nats.url", defaults.notifier.nats.url)?
            .set_default("notifier.nats.subject", defaults.notifier.nats.subject)?
            .set_default("pipeline.timeout_secs", defaults.pipeline.timeout_secs as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

fn load_env_file() {
    let result = match std::env::var(ENV_FILE_VAR) {
        Ok(path) => dotenvy::from_path(&path).map(|_| PathBuf::from(path)),
        Err(_) => dotenvy::dotenv(),
    };
    match result {
        Ok(path) => debug!(path = %path.display(), "Loaded credentials file"),
        Err(e) => debug!(error = %e, "No credentials file loaded"),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stores: StoresConfig {
                redshift: StoreConfig {
                    host: "localhost".to_string(),
                    port: 5439,
                    database: "dev".to_string(),
                    user: "alerts".to_string(),
                    password: String::new(),
                },
                rds: StoreConfig {
                    host: "localhost".to_string(),
                    port: 3306,
                    database: "medusadist_db".to_string(),
                    user: "alerts".to_string(),
                    password: String::new(),
                },
            },
            notifier: NotifierConfig {
                kind: NotifierKind::Slack,
                slack: SlackConfig {
                    token: String::new(),
                    channel: String::new(),
                    api_url: default_slack_api_url(),
                },
                nats: NatsConfig {
                    url: "nats://localhost:4222".to_string(),
                    subject: "alerts.orders".to_string(),
                },
            },
            pipeline: PipelineConfig { timeout_secs: 60 },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
