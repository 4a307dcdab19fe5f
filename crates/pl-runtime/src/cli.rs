//! Command-line interface.

use crate::config::RuntimeConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pl-runtime", version)]
#[command(about = "Invoker harness for the food-product provenance ledger")]
pub struct Cli {
    /// World-state snapshot file (overrides PL_STATE_FILE)
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Seed an empty ledger with the built-in catalog at start
    #[arg(long, global = true)]
    pub seed: bool,

    /// Log filter directive (overrides PL_LOG_LEVEL / RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a transaction: execute, then commit its write-set
    Invoke {
        /// Function name, e.g. CreateProduct
        function: String,
        /// Positional string arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Evaluate a transaction without committing
    Query {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Read JSON-lines requests on stdin, write one reply per line on stdout
    Serve,

    /// List the registered functions
    Functions,
}

impl Cli {
    /// Apply flag overrides on top of the environment configuration.
    #[must_use]
    pub fn apply(&self, mut config: RuntimeConfig) -> RuntimeConfig {
        if let Some(path) = &self.state_file {
            config.state_file = Some(path.clone());
        }
        if self.seed {
            config.seed_on_start = true;
        }
        config
    }
}
