//! # Invocation Messages
//!
//! Wire payloads exchanged with external invokers (the runtime's JSON-lines
//! stream, client SDKs). One request per transaction.
//!
//! ```text
//! {"mode":"submit","function":"TransferProduct","args":["10","RETAILER"]}
//! {"ok":true,"tx_id":"…","payload":"PRODUCER"}
//! ```

use crate::errors::ContractError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// REQUEST
// =============================================================================

/// How an invocation is run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvokeMode {
    /// Execute and commit the write-set.
    #[default]
    Submit,
    /// Execute only. Nothing is committed.
    Evaluate,
}

impl fmt::Display for InvokeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submit => "submit",
            Self::Evaluate => "evaluate",
        })
    }
}

/// Named function call with positional string arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub mode: InvokeMode,
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl InvokeRequest {
    pub fn submit(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            mode: InvokeMode::Submit,
            function: function.into(),
            args,
        }
    }

    pub fn evaluate(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            mode: InvokeMode::Evaluate,
            function: function.into(),
            args,
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Result of a successful invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub tx_id: String,
    pub function: String,
    /// Result encoded for the string surface; empty for void functions.
    pub payload: String,
    pub committed: bool,
    /// Hex SHA-256 over the ordered write-set.
    pub write_set_digest: String,
    pub writes: usize,
}

/// Failure reported to an invoker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: String,
    pub message: String,
}

impl From<&ContractError> for ErrorPayload {
    fn from(err: &ContractError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// One line of the JSON-lines reply stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeReply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl InvokeReply {
    #[must_use]
    pub fn from_result(result: &Result<InvokeResponse, ContractError>) -> Self {
        match result {
            Ok(response) => Self {
                ok: true,
                tx_id: Some(response.tx_id.clone()),
                payload: Some(response.payload.clone()),
                error: None,
            },
            Err(err) => Self::failure(err.into()),
        }
    }

    /// Reply for a request that could not be read.
    #[must_use]
    pub fn failure(error: ErrorPayload) -> Self {
        Self {
            ok: false,
            tx_id: None,
            payload: None,
            error: Some(error),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
