//! # Provenance Ledger Runtime
//!
//! ```text
//! pl-runtime [--state-file PATH] [--seed] invoke CreateProduct Pear 11 "5 kg" 4.5 '{"lat":21,"lng":105.8}' PRODUCER ""
//! pl-runtime [--state-file PATH] query GetAllProducts
//! pl-runtime [--state-file PATH] serve < requests.jsonl
//! pl-runtime functions
//! ```
//!
//! Payloads go to stdout, logs to stderr. A failed invocation exits with
//! status 1.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use pl_02_product_contract::InvokeRequest;
use pl_runtime::cli::{Cli, Command};
use pl_runtime::{function_table, LedgerRuntime, RuntimeConfig};
use pl_telemetry::{init_telemetry, TelemetryConfig};

async fn run_once(runtime: &LedgerRuntime, request: InvokeRequest) -> ExitCode {
    let reply = runtime.execute(&request).await;

    if let Some(error) = reply.error {
        eprintln!("Error [{}]: {}", error.kind, error.message);
        return ExitCode::FAILURE;
    }
    if let Some(payload) = reply.payload.filter(|p| !p.is_empty()) {
        println!("{payload}");
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &cli.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    let _guard = init_telemetry(telemetry).context("Failed to initialize telemetry")?;

    // Load configuration
    let config = cli.apply(RuntimeConfig::from_env().context("Invalid runtime configuration")?);

    match cli.command {
        Command::Functions => {
            print!("{}", function_table());
            Ok(ExitCode::SUCCESS)
        }
        Command::Invoke { function, args } => {
            let runtime = LedgerRuntime::start(config).await?;
            Ok(run_once(&runtime, InvokeRequest::submit(function, args)).await)
        }
        Command::Query { function, args } => {
            let runtime = LedgerRuntime::start(config).await?;
            Ok(run_once(&runtime, InvokeRequest::evaluate(function, args)).await)
        }
        Command::Serve => {
            let runtime = LedgerRuntime::start(config).await?;
            info!("Serving JSON-lines requests on stdin");
            let summary = runtime
                .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
            let stats = runtime.stats().await;
            info!(
                requests = summary.requests,
                failed = summary.failed,
                committed = stats.committed,
                persist_failures = runtime.persist_failures(),
                "Session finished"
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
