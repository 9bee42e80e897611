//! Error types for the gateway.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` conversions.

use std::borrow::Cow;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the query gateway.
///
/// Blocked requests are not errors: the gateway reports them through
/// [`Outcome::Blocked`](crate::gateway::Outcome). Everything here is a
/// genuine failure that propagates to the caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-related errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Query timeout after {0}ms")]
    Timeout(u64),
}

/// Audit sink errors.
///
/// A gateway whose audit trail silently fails provides no real guarantee,
/// so sink failures always surface to the caller of `execute`.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to append to {sink} audit sink {}: {source}", path.display())]
    SinkWrite {
        sink: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode audit record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(Cow<'static, str>),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: Cow<'static, str>,
        message: Cow<'static, str>,
    },

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
}

/// Result type alias for GatewayError.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Result type alias for DatabaseError.
pub type DbResult<T> = std::result::Result<T, DatabaseError>;

/// Result type alias for AuditError.
pub type AuditResult<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let db_error = DatabaseError::ConnectionFailed("test".into());
        let gateway_error: GatewayError = db_error.into();
        assert!(matches!(gateway_error, GatewayError::Database(_)));
    }

    #[test]
    fn test_audit_error_display() {
        let err = AuditError::SinkWrite {
            sink: "jsonl",
            path: PathBuf::from("/var/log/blocked.jsonl"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("jsonl"));
        assert!(msg.contains("blocked.jsonl"));
    }

    #[test]
    fn test_timeout_display() {
        let err = DatabaseError::Timeout(30000);
        assert_eq!(err.to_string(), "Query timeout after 30000ms");
    }
}
