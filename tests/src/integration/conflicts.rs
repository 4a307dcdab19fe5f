//! # Conflicts and Atomicity
//!
//! Transactions never hold locks between get and put. Interleavings are
//! resolved at commit by read-set validation, and a transaction that fails
//! for any reason leaves the world-state exactly as it found it.

use async_trait::async_trait;
use pl_01_world_state::{
    InMemoryWorldState, StateCommitter, StateRangeStream, StoreError, WorldState,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// World-state whose reads can be switched to fail, to model an unreachable
/// peer store mid-transaction. Commits use the provided sequential `commit`.
#[derive(Default)]
pub struct FlakyWorldState {
    inner: InMemoryWorldState,
    fail_reads: AtomicBool,
}

impl FlakyWorldState {
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("peer store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WorldState for FlakyWorldState {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check()?;
        self.inner.get_state(key).await
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.inner.put_state(key, value).await
    }

    async fn delete_state(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete_state(key).await
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateRangeStream, StoreError> {
        self.check()?;
        self.inner.get_state_by_range(start_key, end_key).await
    }
}

impl StateCommitter for FlakyWorldState {}

#[cfg(test)]
mod tests {
    use super::super::{args, create_args, fresh_ledger};
    use super::*;
    use pl_01_world_state::TxContext;
    use pl_02_product_contract::{ContractError, Dispatcher, Invocation, ProductContract};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_interleaved_transfers_second_commit_rejected() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();
        let store = Arc::clone(ledger.store());
        let contract = ProductContract::default();

        // Both transactions read "1" before either commits.
        let mut first = TxContext::new(store.as_ref(), "tx-first");
        let mut second = TxContext::new(store.as_ref(), "tx-second");
        contract
            .execute(
                &mut first,
                Invocation::TransferProduct {
                    id: "1".into(),
                    new_actor: "RETAILER".parse().unwrap(),
                },
            )
            .await
            .unwrap();
        contract
            .execute(
                &mut second,
                Invocation::TransferProduct {
                    id: "1".into(),
                    new_actor: "CONSUMER".parse().unwrap(),
                },
            )
            .await
            .unwrap();

        store.commit(first.rwset()).await.unwrap();
        let err = store.commit(second.rwset()).await.unwrap_err();
        assert_eq!(err, StoreError::MvccReadConflict { key: "1".into() });

        let apple = ledger.evaluate("GetProduct", &args(&["1"])).await.unwrap();
        assert!(apple.payload.contains(r#""actor":"RETAILER""#));
    }

    #[tokio::test]
    async fn test_blind_seed_does_not_conflict() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();
        let store = Arc::clone(ledger.store());

        let mut seed = TxContext::new(store.as_ref(), "tx-seed");
        ProductContract::default()
            .execute(&mut seed, Invocation::InitLedger)
            .await
            .unwrap();
        ledger
            .submit("TransferProduct", &args(&["2", "CONSUMER"]))
            .await
            .unwrap();

        assert!(seed.rwset().reads().is_empty());
        store.commit(seed.rwset()).await.unwrap();
        let banana = ledger.evaluate("GetProduct", &args(&["2"])).await.unwrap();
        assert!(banana.payload.contains(r#""actor":"PRODUCER""#));
    }

    #[tokio::test]
    async fn test_store_failure_aborts_without_writes() {
        let store = Arc::new(FlakyWorldState::default());
        let ledger = Dispatcher::new(Arc::clone(&store));
        ledger.submit("InitLedger", &[]).await.unwrap();
        let before = store.inner.snapshot().unwrap();

        store.set_fail_reads(true);
        for (function, call_args) in [
            ("CreateProduct", create_args("30", "Guava", "PRODUCER")),
            ("TransferProduct", args(&["1", "CONSUMER"])),
            ("DeleteProduct", args(&["2"])),
            ("GetAllProducts", Vec::new()),
        ] {
            let err = ledger.submit(function, &call_args).await.unwrap_err();
            assert!(
                matches!(err, ContractError::Store(StoreError::Unavailable(_))),
                "{function}: {err}"
            );
            assert!(err.is_retryable());
        }
        store.set_fail_reads(false);

        assert_eq!(store.inner.snapshot().unwrap(), before);
        assert_eq!(ledger.stats().await.failed, 4);
    }

    #[tokio::test]
    async fn test_sequential_commit_path_matches_atomic_one() {
        let flaky = Dispatcher::new(Arc::new(FlakyWorldState::default()));
        let memory = fresh_ledger();

        let seeded_flaky = flaky.submit("InitLedger", &[]).await.unwrap();
        let seeded_memory = memory.submit("InitLedger", &[]).await.unwrap();
        assert_eq!(seeded_flaky.write_set_digest, seeded_memory.write_set_digest);

        let a = flaky
            .submit("CreateProduct", &create_args("31", "Pomelo", "RETAILER"))
            .await
            .unwrap();
        let b = memory
            .submit("CreateProduct", &create_args("31", "Pomelo", "RETAILER"))
            .await
            .unwrap();
        assert_eq!(a.write_set_digest, b.write_set_digest);
        assert_eq!(
            flaky.store().inner.snapshot().unwrap(),
            memory.store().snapshot().unwrap()
        );
    }
}
