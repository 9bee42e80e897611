//! Query executor trait.

use crate::database::result::QueryResult;
use crate::error::{DatabaseError, DbResult};
use async_trait::async_trait;
use std::time::Duration;

/// Async seam between the gateway and the backing store.
///
/// Implementations: [`PostgresExecutor`](crate::database::PostgresExecutor).
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Returns the executor name (e.g., "postgres").
    fn name(&self) -> &'static str;

    /// Checks if the executor has active connections in its pool.
    ///
    /// Note: this only checks pool state, not actual database connectivity.
    async fn is_connected(&self) -> bool;

    /// Executes `query` verbatim on a pooled connection and returns the
    /// results. The connection is released on every exit path.
    ///
    /// No rewriting, no retries.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::QueryFailed`] if the store rejects or fails
    /// the query. Returns [`DatabaseError::PoolExhausted`] if no connection
    /// is available.
    async fn run(&self, query: &str) -> DbResult<QueryResult>;

    /// Executes a query with a bounded wait around the execution only.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Timeout`] if the query exceeds the timeout
    /// duration.
    async fn run_with_timeout(
        &self,
        query: &str,
        query_timeout: Duration,
    ) -> DbResult<QueryResult> {
        tokio::time::timeout(query_timeout, self.run(query))
            .await
            .map_err(|_| DatabaseError::Timeout(query_timeout.as_millis() as u64))?
    }
}
