//! # Canonical Serialization
//!
//! Every replica re-executes each transaction and must arrive at the same
//! write-set bytes. Records are therefore encoded as compact JSON with object
//! keys sorted at every nesting level, independent of the order in which the
//! fields were assigned. Array elements keep their order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Canonical encoding errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("JSON encoding error: {0}")]
    Encode(String),

    #[error("JSON decoding error: {0}")]
    Decode(String),
}

/// Encode `value` as canonical JSON bytes.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    let tree = serde_json::to_value(value).map_err(|e| CanonicalError::Encode(e.to_string()))?;
    serde_json::to_vec(&canonicalize_value(tree)).map_err(|e| CanonicalError::Encode(e.to_string()))
}

/// Encode `value` as canonical JSON text.
pub fn to_canonical_string<T: Serialize + ?Sized>(value: &T) -> Result<String, CanonicalError> {
    let tree = serde_json::to_value(value).map_err(|e| CanonicalError::Encode(e.to_string()))?;
    serde_json::to_string(&canonicalize_value(tree)).map_err(|e| CanonicalError::Encode(e.to_string()))
}

/// Decode canonical (or any well-formed) JSON bytes.
pub fn from_canonical_json<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, CanonicalError> {
    serde_json::from_slice(bytes).map_err(|e| CanonicalError::Decode(e.to_string()))
}

/// Rebuild a JSON tree with every object's keys in lexicographic order.
///
/// Entries are re-inserted in sorted order, so the result is canonical whether
/// or not `serde_json` was built with `preserve_order`.
#[must_use]
pub fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut sorted = Map::new();
            for (key, val) in entries {
                sorted.insert(key, canonicalize_value(val));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}

/// True if `bytes` is JSON already in canonical form.
#[must_use]
pub fn is_canonical(bytes: &[u8]) -> bool {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(tree) => serde_json::to_vec(&canonicalize_value(tree))
            .map(|encoded| encoded == bytes)
            .unwrap_or(false),
        Err(_) => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
