//! # Domain Layer (Inner Hexagon)
//!
//! Pure world-state concepts: errors and read/write sets.
//! NO I/O, NO async.

pub mod errors;
pub mod rwset;

pub use errors::*;
pub use rwset::*;
