use thiserror::Error;

/// Errors raised by world-state access and commit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("world-state lock poisoned")]
    LockPoisoned,

    #[error("world-state unavailable: {0}")]
    Unavailable(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("MVCC read conflict on key {key:?}")]
    MvccReadConflict { key: String },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl StoreError {
    /// Returns true if resubmitting the same proposal may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MvccReadConflict { .. } | Self::Unavailable(_))
    }
}
