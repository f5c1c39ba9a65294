//! Operational store adapter (RDS, MySQL)

use super::{coerce_aggregate, AggregateSource};
use crate::config::StoreConfig;
use crate::error::{AlertError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tracing::{debug, info};

const DAILY_AVERAGE_SQL: &str = r#"
SELECT CAST(AVG(total) AS DOUBLE) AS total_sales
FROM orders
WHERE DATE(created_at) = ?
"#;

/// Operational store holding the `orders` table
pub struct RdsStore {
    name: String,
    options: MySqlConnectOptions,
}

impl RdsStore {
    pub fn new(config: &StoreConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        Self {
            name: "RDS".to_string(),
            options,
        }
    }
}

#[async_trait]
impl AggregateSource for RdsStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_aggregate(&self, date: NaiveDate) -> Result<i64> {
        debug!(store = %self.name, "Connecting");
        let mut conn = MySqlConnection::connect_with(&self.options)
            .await
            .map_err(|e| AlertError::source_unavailable(&self.name, e))?;

        let average: Option<f64> = sqlx::query_scalar(DAILY_AVERAGE_SQL)
            .bind(date)
            .fetch_one(&mut conn)
            .await
            .map_err(|e| AlertError::source_unavailable(&self.name, e))?;

        if let Err(e) = conn.close().await {
            debug!(store = %self.name, error = %e, "Connection close failed");
        }

        let value = coerce_aggregate(average);
        info!(store = %self.name, %date, value, "Fetched daily sales aggregate");
        Ok(value)
    }
}
