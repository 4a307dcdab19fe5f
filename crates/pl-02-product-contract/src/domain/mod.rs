//! # Domain Layer (Inner Hexagon)
//!
//! Product records, their field rules and their canonical byte form.
//! NO I/O, NO async.

pub mod canonical;
pub mod entities;
pub mod seed;
pub mod value_objects;

pub use canonical::*;
pub use entities::*;
pub use seed::*;
pub use value_objects::*;
