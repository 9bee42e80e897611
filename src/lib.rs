//! Defensive query-execution gateway for PostgreSQL.
//!
//! Sits between untrusted callers and the store, enforcing three policies
//! before any query reaches a connection: lexical injection screening,
//! per-identity sliding-window rate limiting, and character sanitization.
//! Every blocked attempt is appended to a durable audit trail in two
//! formats (JSON lines and CSV rows).
//!
//! The caller-supplied identity is an opaque token used only as the
//! rate-limiter key; the gateway does not authenticate it.
//!
//! # Example
//!
//! ```no_run
//! use querygate::{
//!     config::GatewayConfig,
//!     database::PostgresExecutor,
//!     gateway::{Gateway, Outcome},
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GatewayConfig::from_env()?;
//!     let executor = Arc::new(PostgresExecutor::connect(&config.database).await?);
//!     let gateway = Gateway::new(executor, &config);
//!
//!     match gateway.execute("caller-1", "SELECT count(*) FROM shipments").await? {
//!         Outcome::Executed { result } => println!("{} rows", result.row_count),
//!         Outcome::Blocked { reason } => println!("blocked: {reason:?}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod config;
pub mod database;
pub mod error;
pub mod gateway;
pub mod security;

pub use audit::{AuditLogger, AuditSink, BlockReason, BlockedQueryRecord};
pub use config::{
    AuditConfig, DatabaseConfig, DatabaseConfigBuilder, GatewayConfig, SecurityConfig,
};
pub use database::{PostgresExecutor, QueryExecutor, QueryResult};
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GatewayBuilder, Outcome};
pub use security::{PatternDetector, RateLimiter, sanitize};
