//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete world-state implementations. Production peers provide their own;
//! the in-memory store backs tests and the runtime harness.

pub mod memory_store;

pub use memory_store::*;
