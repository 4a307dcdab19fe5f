//! # Provenance Ledger Runtime
//!
//! Hosts the product contract for external invokers.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (env, then CLI flags)
//! 2. Restore the world-state snapshot, if a state file is configured
//! 3. Seed the catalog when requested and the world-state is empty
//! 4. Run one invocation, or serve the JSON-lines stream
//!
//! ## Persistence
//!
//! The world-state is in memory. With a state file, the whole snapshot is
//! rewritten after every committed transaction. A failed write does not undo
//! the commit: the reply still reports the transaction, the failure is logged
//! and counted, and the next commit rewrites the full snapshot.

pub mod cli;
pub mod config;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use pl_01_world_state::{InMemoryWorldState, StateSnapshot};
use pl_02_product_contract::{
    Dispatcher, DispatcherStats, ErrorPayload, InvokeReply, InvokeRequest, REGISTRY,
};
use pl_telemetry::{log_event, log_tx_event};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub use config::{ConfigError, RuntimeConfig};

/// Service name on runtime log lines.
pub const SERVICE_NAME: &str = "pl-runtime";

/// Counts for one `serve` session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeSummary {
    pub requests: u64,
    pub failed: u64,
}

/// The contract plus its world-state.
pub struct LedgerRuntime {
    config: RuntimeConfig,
    dispatcher: Dispatcher<InMemoryWorldState>,
    persist_failures: AtomicU64,
}

impl LedgerRuntime {
    /// Restore state and seed if configured.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        let store = match &config.state_file {
            Some(path) => {
                let snapshot = StateSnapshot::load(path)
                    .with_context(|| format!("Failed to load state file {}", path.display()))?;
                info!(path = %path.display(), keys = snapshot.entries.len(), "Restored world-state");
                InMemoryWorldState::from_snapshot(snapshot)
                    .context("State file holds an invalid snapshot")?
            }
            None => InMemoryWorldState::new(),
        };

        let runtime = Self {
            config,
            dispatcher: Dispatcher::new(Arc::new(store)),
            persist_failures: AtomicU64::new(0),
        };

        if runtime.config.seed_on_start && runtime.dispatcher.store().is_empty()? {
            log_event!(info, SERVICE_NAME, "Empty world-state, seeding catalog");
            let reply = runtime
                .execute(&InvokeRequest::submit("InitLedger", Vec::new()))
                .await;
            if let Some(error) = reply.error {
                anyhow::bail!("Seeding failed: {}", error.message);
            }
        }

        Ok(runtime)
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub async fn stats(&self) -> DispatcherStats {
        self.dispatcher.stats().await
    }

    /// Committed transactions whose snapshot could not be written.
    #[must_use]
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    /// Run one request. Contract failures come back inside the reply.
    pub async fn execute(&self, request: &InvokeRequest) -> InvokeReply {
        let result = self
            .dispatcher
            .invoke(request.mode, &request.function, &request.args)
            .await;

        match &result {
            Ok(response) => {
                log_tx_event!(
                    info,
                    SERVICE_NAME,
                    "Invocation succeeded",
                    response.tx_id,
                    response.function,
                    committed = response.committed,
                    writes = response.writes
                );
                if response.committed {
                    if let Err(err) = self.persist() {
                        self.persist_failures.fetch_add(1, Ordering::Relaxed);
                        log_event!(
                            error,
                            SERVICE_NAME,
                            "Transaction committed but state file not written",
                            tx_id = %response.tx_id,
                            error = %format!("{err:#}")
                        );
                    }
                }
            }
            Err(err) => {
                warn!(
                    service = SERVICE_NAME,
                    function = %request.function,
                    kind = err.kind(),
                    error = %err,
                    "Invocation failed"
                );
            }
        }

        InvokeReply::from_result(&result)
    }

    /// JSON-lines loop: one `InvokeRequest` per input line, one `InvokeReply`
    /// per output line. Blank lines are skipped. Ends at end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<ServeSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut summary = ServeSummary::default();

        while let Some(line) = lines.next_line().await.context("Failed to read request")? {
            if line.trim().is_empty() {
                continue;
            }

            let reply = match serde_json::from_str::<InvokeRequest>(&line) {
                Ok(request) => self.execute(&request).await,
                Err(e) => {
                    warn!(error = %e, "Unreadable request line");
                    InvokeReply::failure(ErrorPayload {
                        kind: "InvalidRequest".to_string(),
                        message: e.to_string(),
                    })
                }
            };

            summary.requests += 1;
            if !reply.ok {
                summary.failed += 1;
            }

            let mut encoded = serde_json::to_vec(&reply)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await.context("Failed to write reply")?;
            writer.flush().await?;
        }

        info!(requests = summary.requests, failed = summary.failed, "Input closed");
        Ok(summary)
    }

    fn persist(&self) -> Result<()> {
        if let Some(path) = &self.config.state_file {
            self.dispatcher
                .store()
                .snapshot()?
                .save(path)
                .with_context(|| format!("Failed to write state file {}", path.display()))?;
            debug!(path = %path.display(), "State snapshot written");
        }
        Ok(())
    }
}

/// Tabular listing of the registered functions.
#[must_use]
pub fn function_table() -> String {
    let mut out = format!("{:<16} {:<6} {:<10} {}\n", "FUNCTION", "ARITY", "READ-ONLY", "PARAMETERS");
    for spec in REGISTRY {
        out.push_str(&format!(
            "{:<16} {:<6} {:<10} {}\n",
            spec.name,
            spec.arity(),
            spec.read_only,
            spec.params.join(", ")
        ));
    }
    out
}
