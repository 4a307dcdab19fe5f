//! # PL-01 World State - Transactional Key-Value Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Defines the world-state the product contract runs against. The real store
//! belongs to the hosting ledger platform; this crate only fixes the contract
//! between the two sides and ships an in-memory reference store.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | `WorldState` | `ports/outbound.rs` | get / put / delete / range scan |
//! | `StateCommitter` | `ports/outbound.rs` | Read-set validation + write-set apply |
//! | `TxContext` | `context.rs` | Per-transaction handle, records the rwset |
//! | `ReadWriteSet` | `domain/rwset.rs` | Reads with digests, ordered writes |
//! | `InMemoryWorldState` | `adapters/memory_store.rs` | Ordered map store + snapshots |
//!
//! ## Transaction Model
//!
//! ```text
//! invoke ──→ TxContext ──get──→ WorldState (committed state)
//!               │
//!               └──put/delete──→ write-set (buffered)
//!                                    │
//!                      success ──→ StateCommitter::commit
//!                      failure ──→ dropped, store untouched
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod context;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use context::TxContext;
pub use domain::*;
pub use ports::*;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "World State";
