//! # Ports Layer (Middle Hexagon)
//!
//! - **Driven Ports (Outbound)**: `WorldState`, `StateCommitter`
//! - No concrete implementations in this module

pub mod outbound;

pub use outbound::*;
