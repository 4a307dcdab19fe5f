//! # Product Contract Service
//!
//! Implements the transaction functions over an explicit `TxContext`.
//!
//! Every write goes through `Product::to_bytes`, so each stored value is the
//! canonical encoding of one product with its `id` embedded. Existence checks
//! always precede mutation; a failed check returns before anything is
//! buffered.

use crate::domain::{
    check_id, seed_catalog, to_canonical_string, Actor, LedgerRecord, Product, ProductUpdate,
};
use crate::errors::ContractError;
use crate::ports::inbound::ProductLedgerApi;
use crate::registry::Invocation;

use async_trait::async_trait;
use pl_01_world_state::{TxContext, WorldState};
use tokio_stream::StreamExt;
use tracing::{debug, info, instrument};

/// The product ledger contract.
#[derive(Debug, Clone)]
pub struct ProductContract {
    catalog: Vec<Product>,
}

impl Default for ProductContract {
    fn default() -> Self {
        Self {
            catalog: seed_catalog(),
        }
    }
}

impl ProductContract {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a decoded invocation and encode its result for the string surface.
    pub async fn execute<S: WorldState + ?Sized + 'static>(
        &self,
        ctx: &mut TxContext<'_, S>,
        invocation: Invocation,
    ) -> Result<String, ContractError> {
        match invocation {
            Invocation::InitLedger => {
                self.init_ledger(ctx).await?;
                Ok(String::new())
            }
            Invocation::ProductExists { id } => {
                Ok(self.product_exists(ctx, &id).await?.to_string())
            }
            Invocation::CreateProduct(product) => self.create_product(ctx, product).await,
            Invocation::GetProduct { id } => self.get_product(ctx, &id).await,
            Invocation::GetAllProducts => {
                let records = self.get_all_products(ctx).await?;
                Ok(to_canonical_string(&records)?)
            }
            Invocation::UpdateProduct { id, update } => {
                self.update_product(ctx, &id, update).await?;
                Ok(String::new())
            }
            Invocation::DeleteProduct { id } => {
                self.delete_product(ctx, &id).await?;
                Ok(String::new())
            }
            Invocation::TransferProduct { id, new_actor } => {
                Ok(self.transfer_product(ctx, &id, new_actor).await?.to_string())
            }
        }
    }
}

#[async_trait]
impl<S: WorldState + ?Sized + 'static> ProductLedgerApi<S> for ProductContract {
    #[instrument(skip_all, fields(tx_id = %ctx.tx_id()))]
    async fn init_ledger(&self, ctx: &mut TxContext<'_, S>) -> Result<usize, ContractError> {
        for product in &self.catalog {
            ctx.put_state(&product.id, product.to_bytes()?)?;
        }
        info!(products = self.catalog.len(), "Seeded ledger");
        Ok(self.catalog.len())
    }

    async fn product_exists(
        &self,
        ctx: &mut TxContext<'_, S>,
        id: &str,
    ) -> Result<bool, ContractError> {
        if check_id(id).is_err() {
            return Ok(false);
        }
        Ok(ctx.get_state(id).await?.is_some())
    }

    #[instrument(skip_all, fields(tx_id = %ctx.tx_id(), id = %product.id))]
    async fn create_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        product: Product,
    ) -> Result<String, ContractError> {
        product.validate()?;
        if self.product_exists(ctx, &product.id).await? {
            return Err(ContractError::AlreadyExists(product.id));
        }

        ctx.put_state(&product.id, product.to_bytes()?)?;
        info!(actor = %product.actor, "Product created");
        Ok(format!("Product {} created successfully", product.id))
    }

    async fn get_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        id: &str,
    ) -> Result<String, ContractError> {
        if check_id(id).is_err() {
            return Err(ContractError::NotFound(id.to_string()));
        }
        let bytes = ctx
            .get_state(id)
            .await?
            .ok_or_else(|| ContractError::NotFound(id.to_string()))?;

        Product::from_stored(id, &bytes)?;
        String::from_utf8(bytes).map_err(|e| ContractError::CorruptRecord {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    #[instrument(skip_all, fields(tx_id = %ctx.tx_id()))]
    async fn get_all_products(
        &self,
        ctx: &mut TxContext<'_, S>,
    ) -> Result<Vec<LedgerRecord>, ContractError> {
        let mut entries = ctx.get_state_by_range("", "").await?;
        let mut records = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = entry?;
            let record = LedgerRecord::from_bytes(&entry.value);
            if record.is_raw() {
                debug!(key = %entry.key, "Returning non-JSON value as raw text");
            }
            records.push(record);
        }
        Ok(records)
    }

    #[instrument(skip_all, fields(tx_id = %ctx.tx_id(), id = %id))]
    async fn update_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        id: &str,
        update: ProductUpdate,
    ) -> Result<(), ContractError> {
        if !self.product_exists(ctx, id).await? {
            return Err(ContractError::NotFound(id.to_string()));
        }

        let product = update.into_product(id);
        product.validate()?;
        ctx.put_state(id, product.to_bytes()?)?;
        info!(actor = %product.actor, "Product updated");
        Ok(())
    }

    #[instrument(skip_all, fields(tx_id = %ctx.tx_id(), id = %id))]
    async fn delete_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        id: &str,
    ) -> Result<(), ContractError> {
        if !self.product_exists(ctx, id).await? {
            return Err(ContractError::NotFound(id.to_string()));
        }

        ctx.delete_state(id)?;
        info!("Product deleted");
        Ok(())
    }

    #[instrument(skip_all, fields(tx_id = %ctx.tx_id(), id = %id, to = %new_actor))]
    async fn transfer_product(
        &self,
        ctx: &mut TxContext<'_, S>,
        id: &str,
        new_actor: Actor,
    ) -> Result<Actor, ContractError> {
        let current = self.get_product(ctx, id).await?;
        let product = Product::from_stored(id, current.as_bytes())?;
        let previous = product.actor;

        self.update_product(ctx, id, product.with_actor(new_actor)).await?;
        info!(from = %previous, "Product transferred");
        Ok(previous)
    }
}

// =============================================================================
// TESTS
// =============================================================================
