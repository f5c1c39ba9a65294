//! Analytics warehouse adapter (Redshift, Postgres wire protocol)

use super::{coerce_aggregate, AggregateSource, GroupedCountSource};
use crate::config::StoreConfig;
use crate::error::{AlertError, Result};
use crate::types::{Observation, ObservationSet};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::{debug, info};

const GROUPED_COUNTS_SQL: &str = r#"
SELECT
    CAST(EXTRACT(dow FROM created_at_oli) AS INTEGER) AS day_of_week,
    CAST(EXTRACT(hour FROM created_at_oli) AS INTEGER) AS hour_of_day,
    COUNT(*) AS order_count
FROM sales.order_lines_prod
GROUP BY 1, 2
ORDER BY 1, 2
"#;

const DAILY_AVERAGE_SQL: &str = r#"
SELECT CAST(AVG(order_total) AS DOUBLE PRECISION) AS total_sales
FROM sales.order_lines_prod
WHERE DATE_TRUNC('day', created_at_oli) = $1
"#;

/// Warehouse store holding `sales.order_lines_prod`
pub struct RedshiftStore {
    name: String,
    options: PgConnectOptions,
}

impl RedshiftStore {
    pub fn new(config: &StoreConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        Self {
            name: "Redshift".to_string(),
            options,
        }
    }

    async fn connect(&self) -> Result<PgConnection> {
        debug!(store = %self.name, "Connecting");
        PgConnection::connect_with(&self.options)
            .await
            .map_err(|e| AlertError::source_unavailable(&self.name, e))
    }
}

#[async_trait]
impl GroupedCountSource for RedshiftStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_counts(&self) -> Result<ObservationSet> {
        let mut conn = self.connect().await?;

        let rows: Vec<(i32, i32, i64)> = sqlx::query_as(GROUPED_COUNTS_SQL)
            .fetch_all(&mut conn)
            .await
            .map_err(|e| AlertError::source_unavailable(&self.name, e))?;

        if let Err(e) = conn.close().await {
            debug!(store = %self.name, error = %e, "Connection close failed");
        }

        info!(store = %self.name, rows = rows.len(), "Fetched hourly order counts");

        rows.into_iter()
            .map(|(day, hour, count)| Observation::from_row(day.into(), hour.into(), count))
            .collect()
    }
}

#[async_trait]
impl AggregateSource for RedshiftStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_aggregate(&self, date: NaiveDate) -> Result<i64> {
        let mut conn = self.connect().await?;

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
