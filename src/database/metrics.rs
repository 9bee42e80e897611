//! Executor metrics.

use std::sync::atomic::{AtomicU32, Ordering};

/// Counters maintained by an executor, for monitoring.
#[derive(Debug, Default)]
pub struct ExecutorMetrics {
    pub queries_executed: AtomicU32,
    pub query_errors: AtomicU32,
    pub connection_errors: AtomicU32,
}

impl ExecutorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query_error(&self) {
        self.query_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_connection_error(&self) {
        self.connection_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ExecutorMetricsSnapshot {
        ExecutorMetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            query_errors: self.query_errors.load(Ordering::Relaxed),
            connection_errors: self.connection_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone)]
pub struct ExecutorMetricsSnapshot {
    pub queries_executed: u32,
    pub query_errors: u32,
    pub connection_errors: u32,
}
