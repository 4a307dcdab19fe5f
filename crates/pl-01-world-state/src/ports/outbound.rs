//! # Driven Ports (SPI - Outbound)
//!
//! The world-state is owned by the hosting ledger platform. Contracts only
//! see it through these traits; every call is a round-trip that suspends the
//! calling transaction until the platform answers.

use crate::domain::{value_digest, KeyValue, ReadWriteSet, StoreError, WriteOp};
use async_trait::async_trait;
use std::pin::Pin;
use tokio_stream::Stream;

/// Lazy, finite, single-use sequence of entries in key order.
pub type StateRangeStream = Pin<Box<dyn Stream<Item = Result<KeyValue, StoreError>> + Send>>;

// =============================================================================
// WORLD STATE
// =============================================================================

/// Transactional key-value world-state.
///
/// ## Implementation Notes
///
/// - `put_state` upserts.
/// - `delete_state` on a missing key is not an error here; callers check
///   existence first.
/// - `get_state_by_range` treats `start_key` as inclusive and `end_key` as
///   exclusive. An empty bound is open on that side, so `("", "")` is a full
///   scan.
#[async_trait]
pub trait WorldState: Send + Sync {
    /// Point lookup. `None` if the key holds no value.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Upsert `value` under `key`.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`.
    async fn delete_state(&self, key: &str) -> Result<(), StoreError>;

    /// Ordered scan over `[start_key, end_key)`.
    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateRangeStream, StoreError>;
}

// =============================================================================
// STATE COMMITTER
// =============================================================================

/// Summary of an applied write-set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitReceipt {
    pub puts: usize,
    pub deletes: usize,
}

/// Applies a transaction's read/write set to the world-state.
///
/// The read set is validated first: if any key read by the transaction now
/// holds a different value, the whole write-set is rejected with
/// `StoreError::MvccReadConflict` and nothing is written.
///
/// The provided implementation validates and writes through `WorldState`
/// calls one after another. Adapters that can hold a single lock over both
/// phases should override it so a commit is atomic.
#[async_trait]
pub trait StateCommitter: WorldState {
    async fn commit(&self, rwset: &ReadWriteSet) -> Result<CommitReceipt, StoreError> {
        for (key, seen) in rwset.reads() {
            let current = self.get_state(key).await?;
            if current.as_deref().map(value_digest) != *seen {
                return Err(StoreError::MvccReadConflict { key: key.clone() });
            }
        }

        let mut receipt = CommitReceipt::default();
        for (key, op) in rwset.writes() {
            match op {
                WriteOp::Put(value) => {
                    self.put_state(key, value.clone()).await?;
                    receipt.puts += 1;
                }
                WriteOp::Delete => {
                    self.delete_state(key).await?;
                    receipt.deletes += 1;
                }
            }
        }
        Ok(receipt)
    }
}

// =============================================================================
// TESTS
// =============================================================================
