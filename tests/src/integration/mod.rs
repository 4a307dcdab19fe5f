//! Cross-crate flows: product contract over the world-state.

pub mod conflicts;
pub mod determinism;
pub mod flows;

use pl_01_world_state::InMemoryWorldState;
use pl_02_product_contract::Dispatcher;
use std::sync::Arc;

/// Dispatcher over a fresh in-memory world-state.
#[must_use]
pub fn fresh_ledger() -> Dispatcher<InMemoryWorldState> {
    Dispatcher::new(Arc::new(InMemoryWorldState::new()))
}

/// Owned argument list.
#[must_use]
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// `CreateProduct` arguments in surface order.
#[must_use]
pub fn create_args(id: &str, name: &str, actor: &str) -> Vec<String> {
    args(&[
        name,
        id,
        "12 crates",
        "7.25",
        r#"{"lat":16.0544,"lng":108.2022}"#,
        actor,
        "https://images.provenance-ledger.dev/products/custom.jpg",
    ])
}
