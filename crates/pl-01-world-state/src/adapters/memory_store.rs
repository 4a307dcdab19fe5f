//! # In-Memory World State
//!
//! Ordered in-memory implementation of the world-state ports, used by tests
//! and by the runtime harness. Snapshots let the runtime persist state to a
//! JSON file between invocations.

use crate::domain::{value_digest, KeyValue, ReadWriteSet, StoreError, WriteOp};
use crate::ports::{CommitReceipt, StateCommitter, StateRangeStream, WorldState};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

/// In-memory world-state keyed in lexicographic order.
#[derive(Debug, Default)]
pub struct InMemoryWorldState {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryWorldState {
    /// Create a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read_entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read_entries()?.is_empty())
    }

    /// Export every entry, values hex-encoded.
    pub fn snapshot(&self) -> Result<StateSnapshot, StoreError> {
        let entries = self
            .read_entries()?
            .iter()
            .map(|(k, v)| (k.clone(), hex::encode(v)))
            .collect();
        Ok(StateSnapshot { entries })
    }

    /// Build a state from a snapshot.
    pub fn from_snapshot(snapshot: StateSnapshot) -> Result<Self, StoreError> {
        let mut entries = BTreeMap::new();
        for (key, value) in snapshot.entries {
            let bytes = hex::decode(&value)
                .map_err(|e| StoreError::Snapshot(format!("key {key:?}: {e}")))?;
            entries.insert(key, bytes);
        }
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    fn read_entries(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>, StoreError> {
        self.entries.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_entries(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>, StoreError> {
        self.entries.write().map_err(|_| StoreError::LockPoisoned)
    }
}

/// `(start, end)` bounds for a scan, or `None` when the range is empty.
fn scan_bounds(start_key: &str, end_key: &str) -> Option<(Bound<String>, Bound<String>)> {
    if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
        return None;
    }
    let start = if start_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start_key.to_string())
    };
    let end = if end_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end_key.to_string())
    };
    Some((start, end))
}

#[async_trait]
impl WorldState for InMemoryWorldState {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.write_entries()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<(), StoreError> {
        self.write_entries()?.remove(key);
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateRangeStream, StoreError> {
        let items: Vec<Result<KeyValue, StoreError>> = match scan_bounds(start_key, end_key) {
            Some(bounds) => self
                .read_entries()?
                .range::<String, _>(bounds)
                .map(|(k, v)| Ok(KeyValue::new(k.clone(), v.clone())))
                .collect(),
            None => Vec::new(),
        };
        Ok(Box::pin(tokio_stream::iter(items)))
    }
}

#[async_trait]
impl StateCommitter for InMemoryWorldState {
    /// Validates and applies under one write lock.
    async fn commit(&self, rwset: &ReadWriteSet) -> Result<CommitReceipt, StoreError> {
        let mut entries = self.write_entries()?;

        for (key, seen) in rwset.reads() {
            if entries.get(key).map(|v| value_digest(v)) != *seen {
                debug!(key = %key, "Read set no longer matches world-state");
                return Err(StoreError::MvccReadConflict { key: key.clone() });
            }
        }

        let mut receipt = CommitReceipt::default();
        for (key, op) in rwset.writes() {
            match op {
                WriteOp::Put(value) => {
                    entries.insert(key.clone(), value.clone());
                    receipt.puts += 1;
                }
                WriteOp::Delete => {
                    entries.remove(key);
                    receipt.deletes += 1;
                }
            }
        }
        Ok(receipt)
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Serializable copy of the world-state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Key -> hex-encoded value.
    pub entries: BTreeMap<String, String>,
}

impl StateSnapshot {
    /// Read a snapshot file. A missing file yields an empty snapshot.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Snapshot(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Snapshot(format!("{}: {e}", path.display())))
    }

    /// Write the snapshot as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::Snapshot(e.to_string()))?;
        std::fs::write(path, raw)
            .map_err(|e| StoreError::Snapshot(format!("{}: {e}", path.display())))
    }
}

// =============================================================================
// TESTS
// =============================================================================
