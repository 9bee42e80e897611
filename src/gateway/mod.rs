//! Admission control in front of the store.
//!
//! One [`Gateway::execute`] call makes exactly one decision: run the query,
//! block it (recording the attempt), or fail.

use crate::audit::{AuditLogger, BlockReason, BlockedQueryRecord};
use crate::config::GatewayConfig;
use crate::database::{QueryExecutor, QueryResult};
use crate::error::Result;
use crate::security::{PatternDetector, RateLimiter, sanitize};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// The decision produced by one `execute` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The query was admitted, sanitized, and run against the store.
    Executed { result: QueryResult },
    /// The query was refused admission; the store was never contacted and
    /// the attempt is on the audit trail.
    Blocked { reason: BlockReason },
}

/// Query-execution gateway.
///
/// Composes the detector, rate limiter, audit logger, and executor into a
/// single admission decision per call. Calls for different identities
/// proceed concurrently without contending on rate-limit state.
pub struct Gateway {
    executor: Arc<dyn QueryExecutor>,
    detector: PatternDetector,
    rate_limiter: RateLimiter,
    audit: AuditLogger,
}

impl Gateway {
    pub fn new(executor: Arc<dyn QueryExecutor>, config: &GatewayConfig) -> Self {
        Self {
            executor,
            detector: PatternDetector::new(),
            rate_limiter: RateLimiter::from_config(&config.security),
            audit: AuditLogger::from_config(&config.audit),
        }
    }

    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Run one query for one caller.
    ///
    /// Both policy checks always run: the rate limiter's bookkeeping
    /// advances even when the text is rejected for injection, so every
    /// attempt counts toward the identity's window budget. On rejection
    /// the original, unsanitized text is audited; an audit write failure
    /// is an error, not a silent blocked outcome.
    #[instrument(skip(self, text), fields(identity = %identity))]
    pub async fn execute(&self, identity: &str, text: &str) -> Result<Outcome> {
        let suspicious = self.detector.is_suspicious(text);
        let admitted = self.rate_limiter.check_and_record(identity, Instant::now());

        let reason = if suspicious {
            Some(BlockReason::Injection)
        } else if !admitted {
            Some(BlockReason::RateLimited)
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!(?reason, "query blocked");
            self.audit
                .record_blocked(&BlockedQueryRecord::new(identity, text))?;
            return Ok(Outcome::Blocked { reason });
        }

        let query = sanitize(text);
        debug!("query admitted");

        let result = self.executor.run(&query).await?;
        Ok(Outcome::Executed { result })
    }
}

/// Builder for [`Gateway`].
pub struct GatewayBuilder {
    executor: Option<Arc<dyn QueryExecutor>>,
    config: GatewayConfig,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            executor: None,
            config: GatewayConfig::default(),
        }
    }

    pub fn executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn security(mut self, security: crate::config::SecurityConfig) -> Self {
        self.config.security = security;
        self
    }

    pub fn audit(mut self, audit: crate::config::AuditConfig) -> Self {
        self.config.audit = audit;
        self
    }

    pub fn build(self) -> std::result::Result<Gateway, &'static str> {
        let executor = self.executor.ok_or("Executor is required")?;
        Ok(Gateway::new(executor, &self.config))
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
