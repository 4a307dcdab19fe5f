//! # Transaction Context
//!
//! Explicit handle passed to every contract operation. It carries the store
//! reference and records the transaction's read/write set.
//!
//! Reads go to the committed world-state. Writes are buffered in the write-set
//! and only reach the store when the platform commits it, so a transaction
//! that fails part-way leaves no trace. Reads do not observe the
//! transaction's own buffered writes.

use crate::domain::{ReadWriteSet, StoreError};
use crate::ports::{StateRangeStream, WorldState};
use tracing::trace;

/// Per-invocation view of the world-state.
pub struct TxContext<'a, S: WorldState + ?Sized> {
    store: &'a S,
    tx_id: String,
    rwset: ReadWriteSet,
}

impl<'a, S: WorldState + ?Sized> TxContext<'a, S> {
    pub fn new(store: &'a S, tx_id: impl Into<String>) -> Self {
        Self {
            store,
            tx_id: tx_id.into(),
            rwset: ReadWriteSet::new(),
        }
    }

    #[must_use]
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    #[must_use]
    pub fn rwset(&self) -> &ReadWriteSet {
        &self.rwset
    }

    /// Consume the context, yielding what the transaction read and wrote.
    #[must_use]
    pub fn into_rwset(self) -> ReadWriteSet {
        self.rwset
    }

    /// Point lookup against committed state. Recorded in the read set.
    pub async fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        let value = self.store.get_state(key).await?;
        trace!(tx_id = %self.tx_id, key, found = value.is_some(), "get_state");
        self.rwset.record_read(key, value.as_deref());
        Ok(value)
    }

    /// Buffer an upsert.
    pub fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        validate_key(key)?;
        trace!(tx_id = %self.tx_id, key, bytes = value.len(), "put_state");
        self.rwset.record_put(key, value);
        Ok(())
    }

    /// Buffer a removal.
    pub fn delete_state(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        trace!(tx_id = %self.tx_id, key, "delete_state");
        self.rwset.record_delete(key);
        Ok(())
    }

    /// Ordered scan over `[start_key, end_key)`; empty bounds are open.
    pub async fn get_state_by_range(
        &mut self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateRangeStream, StoreError> {
        trace!(tx_id = %self.tx_id, start_key, end_key, "get_state_by_range");
        self.rwset.record_range_query(start_key, end_key);
        self.store.get_state_by_range(start_key, end_key).await
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("key must not be empty".to_string()));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
