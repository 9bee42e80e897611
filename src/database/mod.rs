//! Store access layer.

pub mod metrics;
pub mod postgres;
pub mod result;
pub mod traits;

pub use metrics::{ExecutorMetrics, ExecutorMetricsSnapshot};
pub use postgres::PostgresExecutor;
pub use result::{CellValue, Column, QueryResult, Row};
pub use traits::QueryExecutor;
