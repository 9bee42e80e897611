//! PostgreSQL executor using `tokio-postgres` and `deadpool`.

use crate::config::DatabaseConfig;
use crate::database::metrics::{ExecutorMetrics, ExecutorMetricsSnapshot};
use crate::database::result::{CellValue, Column, QueryResult, Row};
use crate::database::traits::QueryExecutor;
use crate::error::{DatabaseError, DbResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::{Config as DeadpoolConfig, Pool, PoolConfig, Runtime};
use std::sync::Arc;
use std::time::Instant;
use tokio_postgres::NoTls;
use tracing::{debug, info, instrument};

/// PostgreSQL query executor backed by a connection pool.
///
/// Pooled connections are handed back on drop, so release happens on every
/// exit path: success, query failure, or task cancellation.
pub struct PostgresExecutor {
    pool: Pool,
    metrics: Arc<ExecutorMetrics>,
}

impl PostgresExecutor {
    /// Create a new executor with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!(
            "Connecting to PostgreSQL: {}:{}/{}",
            config.host, config.port, config.database
        );

        let mut deadpool_config = DeadpoolConfig::new();
        deadpool_config.host = Some(config.host.clone());
        deadpool_config.port = Some(config.port);
        deadpool_config.dbname = Some(config.database.clone());
        deadpool_config.user = Some(config.username.clone());
        deadpool_config.password = Some(config.password.clone());
        deadpool_config.pool = Some(PoolConfig::new(config.pool_size as usize));

        let pool = deadpool_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        // Test connection
        let _conn = pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        info!(
            "PostgreSQL connection pool created with max size {}",
            config.pool_size
        );

        Ok(Self {
            pool,
            metrics: Arc::new(ExecutorMetrics::new()),
        })
    }

    pub fn metrics(&self) -> ExecutorMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Convert a PostgreSQL row to our Row type.
    fn convert_row(pg_row: &tokio_postgres::Row, columns: &[Column]) -> Row {
        let mut row = Row::new();
        for (i, col) in columns.iter().enumerate() {
            let value = Self::get_cell_value(pg_row, i, &col.data_type);
            row.insert(col.name.clone(), value);
        }
        row
    }

    /// Extract a cell value, keyed off the column's type name.
    fn get_cell_value(row: &tokio_postgres::Row, index: usize, data_type: &str) -> CellValue {
        match data_type {
            "int2" | "smallint" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<i16>>(index) {
                    return CellValue::Int(v as i64);
                }
            }
            "int4" | "integer" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<i32>>(index) {
                    return CellValue::Int(v as i64);
                }
            }
            "int8" | "bigint" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<i64>>(index) {
                    return CellValue::Int(v);
                }
            }
            "float4" | "real" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<f32>>(index) {
                    return CellValue::Float(v as f64);
                }
            }
            "float8" | "double precision" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<f64>>(index) {
                    return CellValue::Float(v);
                }
            }
            "bool" | "boolean" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<bool>>(index) {
                    return CellValue::Bool(v);
                }
            }
            "timestamptz" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<DateTime<Utc>>>(index) {
                    return CellValue::DateTime(v);
                }
            }
            "timestamp" => {
                if let Ok(Some(v)) = row.try_get::<_, Option<chrono::NaiveDateTime>>(index) {
                    return CellValue::DateTime(DateTime::from_naive_utc_and_offset(v, Utc));
                }
            }
            _ => {}
        }

        // Fallback: text-like columns and anything unrecognized.
        if let Ok(Some(v)) = row.try_get::<_, Option<String>>(index) {
            return CellValue::String(v);
        }

        CellValue::Null
    }
}

#[async_trait]
impl QueryExecutor for PostgresExecutor {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn is_connected(&self) -> bool {
        self.pool.status().available > 0 || self.pool.get().await.is_ok()
    }

    #[instrument(skip(self, query), fields(db = "postgres"))]
    async fn run(&self, query: &str) -> DbResult<QueryResult> {
        let start = Instant::now();
        let conn = self.pool.get().await.map_err(|_| {
            self.metrics.record_connection_error();
            DatabaseError::PoolExhausted
        })?;

        debug!("Executing query: {}", query);

        let stmt = conn.prepare(query).await.map_err(|e| {
            self.metrics.record_query_error();
            DatabaseError::QueryFailed(e.to_string())
        })?;

        let pg_rows = conn.query(&stmt, &[]).await.map_err(|e| {
            self.metrics.record_query_error();
            DatabaseError::QueryFailed(e.to_string())
        })?;

        let elapsed = start.elapsed().as_millis() as u64;
        self.metrics.record_query_executed();

        let columns: Vec<Column> = stmt
            .columns()
            .iter()
            .map(|c| Column::new(c.name(), c.type_().name()))
            .collect();

        let rows: Vec<Row> = pg_rows
            .iter()
            .map(|r| Self::convert_row(r, &columns))
            .collect();

        Ok(QueryResult::new(columns, rows, elapsed))
    }
}
