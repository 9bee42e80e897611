//! Durable audit trail for blocked queries.
//!
//! Every rejected request is appended to two independent sinks: a
//! JSON-lines file and a tabular CSV-style file. Appends are scoped
//! open-append-close operations with no batching, and write failures
//! surface to the caller.

use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Why a request was refused admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    Injection,
    RateLimited,
}

/// A single blocked attempt, as written to the audit sinks.
///
/// Carries the original, unsanitized query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedQueryRecord {
    pub identity: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl BlockedQueryRecord {
    /// Create a record stamped with the current time.
    pub fn new(identity: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only destination for blocked-query records.
pub trait AuditSink: Send + Sync {
    fn append(&self, record: &BlockedQueryRecord) -> AuditResult<()>;
}

/// One self-contained JSON object per line, timestamp as RFC 3339.
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuditSink for JsonLinesSink {
    fn append(&self, record: &BlockedQueryRecord) -> AuditResult<()> {
        let line = serde_json::to_string(record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::SinkWrite {
                sink: "jsonl",
                path: self.path.clone(),
                source,
            })?;

        writeln!(file, "{line}").map_err(|source| AuditError::SinkWrite {
            sink: "jsonl",
            path: self.path.clone(),
            source,
        })
    }
}

/// One comma-separated row per record: identity, text, timestamp.
///
/// No header row is ever written. Embedded commas or quotes in the query
/// text pass through unescaped, so a row is not guaranteed to split back
/// into three fields; the JSON-lines sink is the machine-readable one.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuditSink for CsvSink {
    fn append(&self, record: &BlockedQueryRecord) -> AuditResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::SinkWrite {
                sink: "csv",
                path: self.path.clone(),
                source,
            })?;

        writeln!(
            file,
            "{},{},{}",
            record.identity,
            record.text,
            record.timestamp.to_rfc3339()
        )
        .map_err(|source| AuditError::SinkWrite {
            sink: "csv",
            path: self.path.clone(),
            source,
        })
    }
}

/// Writes every blocked attempt to both sinks.
///
/// The two appends are independent: there is no cross-sink atomicity, so a
/// failed CSV append can leave the JSON-lines sink one record ahead.
pub struct AuditLogger {
    sinks: Vec<Box<dyn AuditSink>>,
}

impl AuditLogger {
    pub fn new(jsonl_path: impl Into<PathBuf>, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            sinks: vec![
                Box::new(JsonLinesSink::new(jsonl_path)),
                Box::new(CsvSink::new(csv_path)),
            ],
        }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.jsonl_path.clone(), config.csv_path.clone())
    }

    /// Append `record` to every sink, stopping at the first failure.
    pub fn record_blocked(&self, record: &BlockedQueryRecord) -> AuditResult<()> {
        for sink in &self.sinks {
            sink.append(record)?;
        }
        debug!(identity = %record.identity, "blocked query recorded");
        Ok(())
    }
}
