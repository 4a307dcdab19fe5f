//! # PL-02 Product Contract - Food-Product Provenance Ledger
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Manages the lifecycle of food-product records in the world-state while
//! they pass between supply-chain actors. Every node re-executes each
//! transaction, so the contract is deterministic: same inputs and same state
//! give byte-identical write-sets.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Canonical serializer | `domain/canonical.rs` | Sorted-key compact JSON |
//! | Asset model | `domain/entities.rs`, `domain/value_objects.rs` | `Product`, `Actor`, `Location` |
//! | Seed catalog | `domain/seed.rs` | Products written by `InitLedger` |
//! | `ProductLedgerApi` | `ports/inbound.rs` | Transaction functions |
//! | `ProductContract` | `service.rs` | Implementation over `TxContext` |
//! | `REGISTRY` | `registry.rs` | Name, arity, read-only flag, decoder |
//! | `Dispatcher` | `dispatcher.rs` | One invocation = one transaction |
//! | Invocation messages | `events.rs` | Request / reply payloads |
//!
//! ## Usage
//!
//! ```ignore
//! let dispatcher = Dispatcher::new(Arc::new(InMemoryWorldState::new()));
//! dispatcher.submit("InitLedger", &[]).await?;
//! let apple = dispatcher.evaluate("GetProduct", &["1".into()]).await?;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod registry;
pub mod service;

pub use dispatcher::{Dispatcher, DispatcherStats};
pub use domain::*;
pub use errors::ContractError;
pub use events::{ErrorPayload, InvokeMode, InvokeReply, InvokeRequest, InvokeResponse};
pub use ports::ProductLedgerApi;
pub use registry::{lookup, Invocation, OperationSpec, REGISTRY};
pub use service::ProductContract;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Product Contract";
