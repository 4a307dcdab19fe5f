//! # Read/Write Sets
//!
//! Everything a transaction observed and produced. Reads carry the digest of
//! the value seen so the commit path can detect that another transaction
//! changed the key in between. Writes are kept in key order so the write-set
//! encodes identically on every replica.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

// =============================================================================
// KEY / VALUE
// =============================================================================

/// A single world-state entry as returned by range scans.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Hex SHA-256 of a stored value.
#[must_use]
pub fn value_digest(value: &[u8]) -> String {
    hex::encode(Sha256::digest(value))
}

// =============================================================================
// WRITE OPERATIONS
// =============================================================================

/// Buffered mutation of one key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteOp {
    Put(Vec<u8>),
    Delete,
}

/// Bounds of a range scan issued during the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    pub start_key: String,
    pub end_key: String,
}

// =============================================================================
// READ / WRITE SET
// =============================================================================

/// Access record of one transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadWriteSet {
    /// Key -> digest of the value read (`None` when the key was absent).
    reads: BTreeMap<String, Option<String>>,
    range_queries: Vec<RangeQuery>,
    writes: BTreeMap<String, WriteOp>,
}

impl ReadWriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a point read. Only the first observation of a key is kept.
    pub fn record_read(&mut self, key: &str, value: Option<&[u8]>) {
        self.reads
            .entry(key.to_string())
            .or_insert_with(|| value.map(value_digest));
    }

    pub fn record_range_query(&mut self, start_key: &str, end_key: &str) {
        self.range_queries.push(RangeQuery {
            start_key: start_key.to_string(),
            end_key: end_key.to_string(),
        });
    }

    /// Buffers a put. A later write to the same key replaces an earlier one.
    pub fn record_put(&mut self, key: &str, value: Vec<u8>) {
        self.writes.insert(key.to_string(), WriteOp::Put(value));
    }

    pub fn record_delete(&mut self, key: &str) {
        self.writes.insert(key.to_string(), WriteOp::Delete);
    }

    #[must_use]
    pub fn reads(&self) -> &BTreeMap<String, Option<String>> {
        &self.reads
    }

    #[must_use]
    pub fn range_queries(&self) -> &[RangeQuery] {
        &self.range_queries
    }

    #[must_use]
    pub fn writes(&self) -> &BTreeMap<String, WriteOp> {
        &self.writes
    }

    /// Value buffered for `key` by this transaction, if any.
    #[must_use]
    pub fn pending_write(&self, key: &str) -> Option<&WriteOp> {
        self.writes.get(key)
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }

    /// Hex SHA-256 over the ordered write-set.
    ///
    /// Each entry is length-prefixed so no two distinct write-sets share an
    /// encoding. Replicas agree on a transaction iff these digests match.
    #[must_use]
    pub fn write_set_digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, op) in &self.writes {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(key.as_bytes());
            match op {
                WriteOp::Put(value) => {
                    hasher.update([1u8]);
                    hasher.update((value.len() as u64).to_be_bytes());
                    hasher.update(value);
                }
                WriteOp::Delete => hasher.update([0u8]),
            }
        }
        hex::encode(hasher.finalize())
    }
}

// =============================================================================
// TESTS
// =============================================================================
