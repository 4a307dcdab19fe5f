//! # Driving Ports (API - Inbound)
//!
//! The transaction functions of the product ledger. Each call runs inside the
//! caller's `TxContext`; writes land in its write-set and reach the
//! world-state only when the dispatcher commits it.

use crate::domain::{Actor, LedgerRecord, Product, ProductUpdate};
use crate::errors::ContractError;
use async_trait::async_trait;
use pl_01_world_state::{TxContext, WorldState};

// =============================================================================
// PRODUCT LEDGER API (Primary Driving Port)
// =============================================================================

/// Operations of the product provenance contract.
///
/// ## State Machine (per id)
///
/// ```text
/// NonExistent ──create──→ Exists ──update/transfer──→ Exists
///      ↑                    │
///      └──────delete────────┘
/// ```
#[async_trait]
pub trait ProductLedgerApi<S: WorldState + ?Sized + 'static>: Send + Sync {
    /// Write the seed catalog, overwriting whatever is stored under its ids.
    async fn init_ledger(&self, ctx: &mut TxContext<'_, S>) -> Result<usize, ContractError>;

    /// True iff a value is stored under `id`.
    async fn product_exists(&self, ctx: &mut TxContext<'_, S>, id: &str)
        -> Result<bool, ContractError>;

    /// Store a new product. Fails `AlreadyExists` if the id is taken.
    async fn create_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        product: Product,
    ) -> Result<String, ContractError>;

    /// Stored JSON text of the product. Fails `NotFound` if absent.
    async fn get_product(&self, ctx: &mut TxContext<'_, S>, id: &str)
        -> Result<String, ContractError>;

    /// Every stored record in key order.
    async fn get_all_products(
        &self,
        ctx: &mut TxContext<'_, S>,
    ) -> Result<Vec<LedgerRecord>, ContractError>;

    /// Replace every mutable field. Fails `NotFound` if absent.
    async fn update_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        id: &str,
        update: ProductUpdate,
    ) -> Result<(), ContractError>;

    /// Remove the product. Fails `NotFound` if absent.
    async fn delete_product(&self, ctx: &mut TxContext<'_, S>, id: &str)
        -> Result<(), ContractError>;

    /// Hand the product to `new_actor`, returning the previous holder.
    async fn transfer_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        id: &str,
        new_actor: Actor,
    ) -> Result<Actor, ContractError>;
}
