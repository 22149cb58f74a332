use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};
use crate::model::Reading;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::MySql;
use std::time::Duration;
use tracing::{debug, info};

const READING_COLUMNS: &str = "id, `timestamp`, temperature, pressure, humidity, rain, rain_rate, \
     luminance, wind_speed, wind_direction, `day`, `week`, `month`, `year`";

/// Read access to the readings table.
#[allow(async_fn_in_trait)]
pub trait ReadingStore {
    /// Total number of readings.
    async fn count(&mut self) -> Result<i64>;

    /// Readings newest id first, skipping `offset` and returning at most `limit`.
    async fn fetch_page(&mut self, limit: i64, offset: i64) -> Result<Vec<Reading>>;
}

/// Builds the pool without connecting. Connection problems surface on the
/// first request that needs the database.
pub fn make_pool(config: &DatabaseConfig) -> MySqlPool {
    info!(
        "Database: {}:{}/{} table {}",
        config.host, config.port, config.database, config.table
    );

    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database);

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(options)
}

/// A readings store holding one pooled connection for the length of a
/// request. The connection goes back to the pool when the store is dropped.
pub struct MySqlStore {
    conn: PoolConnection<MySql>,
    count_sql: String,
    page_sql: String,
}

impl MySqlStore {
    /// `table` must already be validated as a plain identifier.
    pub async fn acquire(pool: &MySqlPool, table: &str) -> Result<Self> {
        let conn = pool.acquire().await.map_err(Error::Connection)?;
        debug!("Acquired database connection");

        Ok(Self {
            conn,
            count_sql: count_query(table),
            page_sql: page_query(table),
        })
    }
}

impl ReadingStore for MySqlStore {
    async fn count(&mut self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(&self.count_sql)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(Error::Query)
    }

    async fn fetch_page(&mut self, limit: i64, offset: i64) -> Result<Vec<Reading>> {
        sqlx::query_as::<_, Reading>(&self.page_sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(Error::Query)
    }
}

pub fn count_query(table: &str) -> String {
    format!("SELECT COUNT(*) FROM `{}`", table)
}

pub fn page_query(table: &str) -> String {
    format!(
        "SELECT {} FROM `{}` ORDER BY id DESC LIMIT ? OFFSET ?",
        READING_COLUMNS, table
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_query() {
        assert_eq!(count_query("data"), "SELECT COUNT(*) FROM `data`");
    }

    #[test]
    fn test_page_query_orders_newest_first() {
        let sql = page_query("data");

        assert!(sql.starts_with("SELECT id, `timestamp`, temperature"));
        assert!(sql.contains("FROM `data`"));
        assert!(sql.ends_with("ORDER BY id DESC LIMIT ? OFFSET ?"));
    }
}
