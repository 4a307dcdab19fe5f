//! # Dispatcher
//!
//! Runs each invocation as one transaction:
//!
//! ```text
//! name + args ──lookup──→ OperationSpec ──decode──→ Invocation
//!                                                       │
//!                       fresh TxContext ←───────────────┘
//!                              │
//!                  ProductContract::execute
//!                              │
//!        ok + submit + !read_only ──→ StateCommitter::commit(rwset)
//!        otherwise             ──→ rwset dropped
//! ```

use crate::errors::ContractError;
use crate::events::{InvokeMode, InvokeReply, InvokeRequest, InvokeResponse};
use crate::registry::{self, Invocation, OperationSpec};
use crate::service::ProductContract;

use pl_01_world_state::{StateCommitter, TxContext};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn, Span};
use uuid::Uuid;

/// Dispatcher counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatcherStats {
    /// Invocations received in submit mode.
    pub submitted: u64,
    /// Invocations received in evaluate mode.
    pub evaluated: u64,
    /// Write-sets committed.
    pub committed: u64,
    /// Invocations that failed during execution or commit.
    pub failed: u64,
    /// Unknown functions and invalid arguments.
    pub rejected: u64,
}

/// Entry point for invokers.
pub struct Dispatcher<S: StateCommitter + ?Sized + 'static> {
    contract: ProductContract,
    store: Arc<S>,
    stats: Arc<RwLock<DispatcherStats>>,
}

impl<S: StateCommitter + ?Sized + 'static> Dispatcher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            contract: ProductContract::default(),
            store,
            stats: Arc::new(RwLock::new(DispatcherStats::default())),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn stats(&self) -> DispatcherStats {
        self.stats.read().await.clone()
    }

    /// Execute and commit.
    pub async fn submit(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<InvokeResponse, ContractError> {
        self.invoke(InvokeMode::Submit, function, args).await
    }

    /// Execute without committing.
    pub async fn evaluate(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<InvokeResponse, ContractError> {
        self.invoke(InvokeMode::Evaluate, function, args).await
    }

    /// Handle one wire request.
    pub async fn handle_request(&self, request: &InvokeRequest) -> InvokeReply {
        let result = self
            .invoke(request.mode, &request.function, &request.args)
            .await;
        InvokeReply::from_result(&result)
    }

    #[instrument(skip(self, mode, args), fields(mode = %mode, tx_id = tracing::field::Empty))]
    pub async fn invoke(
        &self,
        mode: InvokeMode,
        function: &str,
        args: &[String],
    ) -> Result<InvokeResponse, ContractError> {
        {
            let mut stats = self.stats.write().await;
            match mode {
                InvokeMode::Submit => stats.submitted += 1,
                InvokeMode::Evaluate => stats.evaluated += 1,
            }
        }

        let (spec, invocation) = match prepare(function, args) {
            Ok(prepared) => prepared,
            Err(err) => {
                self.record_failure(&err).await;
                return Err(err);
            }
        };

        let tx_id = Uuid::new_v4().to_string();
        Span::current().record("tx_id", tx_id.as_str());

        let mut ctx = TxContext::new(self.store.as_ref(), tx_id.clone());
        let outcome = self.contract.execute(&mut ctx, invocation).await;
        let rwset = ctx.into_rwset();

        let payload = match outcome {
            Ok(payload) => payload,
            Err(err) => {
                self.record_failure(&err).await;
                return Err(err);
            }
        };

        let committed = mode == InvokeMode::Submit && !spec.read_only;
        if committed {
            if let Err(err) = self.store.commit(&rwset).await {
                let err = ContractError::from(err);
                self.record_failure(&err).await;
                return Err(err);
            }
            self.stats.write().await.committed += 1;
            info!(writes = rwset.writes().len(), "Transaction committed");
        } else {
            debug!(read_only = spec.read_only, "Transaction evaluated");
        }

        Ok(InvokeResponse {
            tx_id,
            function: spec.name.to_string(),
            payload,
            committed,
            write_set_digest: rwset.write_set_digest(),
            writes: rwset.writes().len(),
        })
    }

    async fn record_failure(&self, err: &ContractError) {
        let mut stats = self.stats.write().await;
        if err.is_rejection() {
            warn!(error = %err, "Invocation rejected");
            stats.rejected += 1;
        } else {
            warn!(error = %err, retryable = err.is_retryable(), "Invocation failed, write-set discarded");
            stats.failed += 1;
        }
    }
}

fn prepare(
    function: &str,
    args: &[String],
) -> Result<(&'static OperationSpec, Invocation), ContractError> {
    let spec = registry::lookup(function)
        .ok_or_else(|| ContractError::UnknownFunction(function.to_string()))?;
    let invocation = spec.decode_args(args)?;
    Ok((spec, invocation))
}

// =============================================================================
// TESTS
// =============================================================================
