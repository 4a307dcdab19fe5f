//! # Runtime Configuration
//!
//! Environment supplies defaults; CLI flags override them.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Snapshot file loaded at start and rewritten after each commit.
    /// `None` keeps state in memory for the process lifetime.
    pub state_file: Option<PathBuf>,
    /// Run `InitLedger` at start when the world-state is empty.
    pub seed_on_start: bool,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a boolean (true/false/1/0), got {value:?}")]
    InvalidFlag { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    EmptyPath(&'static str),
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// - `PL_STATE_FILE`: snapshot path (default: none)
    /// - `PL_SEED_ON_START`: seed an empty ledger at start (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let state_file = match lookup("PL_STATE_FILE") {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::EmptyPath("PL_STATE_FILE"))
            }
            Some(path) => Some(PathBuf::from(path)),
            None => None,
        };

        let seed_on_start = match lookup("PL_SEED_ON_START") {
            Some(value) => parse_bool("PL_SEED_ON_START", &value)?,
            None => false,
        };

        Ok(Self {
            state_file,
            seed_on_start,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}
