//! # Ports Layer
//!
//! - `inbound`: the contract API driven by the dispatcher.
//! - Outbound access to the world-state is `pl_01_world_state::WorldState`,
//!   reached through the `TxContext` each operation receives.

pub mod inbound;

pub use inbound::*;
