//! # Error Types
//!
//! Typed failures of the product contract. Every variant is raised before the
//! transaction's write-set is committed, so a failed invocation never mutates
//! the world-state.

use crate::domain::canonical::CanonicalError;
use pl_01_world_state::StoreError;
use thiserror::Error;

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors returned by contract operations and the dispatcher.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractError {
    /// No product is stored under the id.
    #[error("the product {0} does not exist")]
    NotFound(String),

    /// A product is already stored under the id.
    #[error("the product {0} already exists")]
    AlreadyExists(String),

    /// A positional argument could not be decoded or violates a field rule.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The function name is not in the registry.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{function} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// Stored bytes under `id` are not a product record.
    #[error("corrupt record under key {id:?}: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] CanonicalError),

    #[error("world-state error: {0}")]
    Store(#[from] StoreError),
}

impl ContractError {
    /// Stable error class name reported to invokers.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::UnknownFunction(_) => "UnknownFunction",
            Self::ArityMismatch { .. } => "ArityMismatch",
            Self::CorruptRecord { .. } => "CorruptRecord",
            Self::Serialization(_) => "Serialization",
            Self::Store(StoreError::MvccReadConflict { .. }) => "MvccReadConflict",
            Self::Store(_) => "Store",
        }
    }

    /// True when the invocation was refused for its function name or arguments.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnknownFunction(_) | Self::ArityMismatch { .. } | Self::InvalidArgument(_)
        )
    }

    /// Resubmitting the same invocation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_retryable())
    }
}

/// Shorthand for argument validation failures.
pub(crate) fn invalid(msg: impl Into<String>) -> ContractError {
    ContractError::InvalidArgument(msg.into())
}

// =============================================================================
// TESTS
// =============================================================================
