//! Gateway binary entry point.
//!
//! One-shot: reads configuration from the environment, runs a single query
//! through the gateway for the given identity, and prints the outcome as
//! JSON to stdout.

use anyhow::{Context, Result};
use querygate::{
    config::GatewayConfig,
    database::PostgresExecutor,
    gateway::{Gateway, Outcome},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut args = std::env::args().skip(1);
    let (identity, text) = match (args.next(), args.next()) {
        (Some(identity), Some(text)) => (identity, text),
        _ => {
            eprintln!("usage: querygate <identity> <query>");
            std::process::exit(2);
        }
    };

    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;

    let executor = PostgresExecutor::connect(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;

    let gateway = Gateway::new(Arc::new(executor), &config);

    let outcome = gateway.execute(&identity, &text).await?;

    if let Outcome::Blocked { reason } = &outcome {
        warn!(?reason, "request was blocked");
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("querygate=info,warn"));

    // Structured JSON logs on stderr; stdout carries the outcome.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .json()
        .init();
}
