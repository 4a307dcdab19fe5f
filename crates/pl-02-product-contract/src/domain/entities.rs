//! # Domain Entities
//!
//! The product record and the shapes it takes on the way in and out of the
//! world-state.

use crate::domain::canonical::{from_canonical_json, to_canonical_json};
use crate::domain::value_objects::{check_id, check_price, positive_zero, Actor, Location};
use crate::errors::ContractError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// PRODUCT
// =============================================================================

/// A food product tracked on the ledger, stored under its `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Immutable once created. Older records may omit it; the key is used then.
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Free-form amount with unit, e.g. `"100 kg"`.
    pub quantity: String,
    pub price: f64,
    pub location: Location,
    pub actor: Actor,
    pub image_url: String,
}

impl Product {
    /// Check the field rules that hold for every stored product.
    pub fn validate(&self) -> Result<(), ContractError> {
        check_id(&self.id)?;
        check_price(self.price)?;
        self.location.validate()
    }

    /// Canonical bytes written to the world-state.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ContractError> {
        let stored = Self {
            price: positive_zero(self.price),
            location: self.location.normalized(),
            ..self.clone()
        };
        Ok(to_canonical_json(&stored)?)
    }

    /// Decode the value stored under `key`.
    pub fn from_stored(key: &str, bytes: &[u8]) -> Result<Self, ContractError> {
        let mut product: Self = from_canonical_json(bytes).map_err(|e| ContractError::CorruptRecord {
            id: key.to_string(),
            reason: e.to_string(),
        })?;

        if product.id.is_empty() {
            product.id = key.to_string();
        } else if product.id != key {
            return Err(ContractError::CorruptRecord {
                id: key.to_string(),
                reason: format!("embedded id {:?} does not match key", product.id),
            });
        }
        Ok(product)
    }

    /// Copy of this product with a different holder.
    #[must_use]
    pub fn with_actor(&self, actor: Actor) -> ProductUpdate {
        ProductUpdate {
            actor,
            ..ProductUpdate::from(self.clone())
        }
    }
}

// =============================================================================
// PRODUCT UPDATE
// =============================================================================

/// Replacement values for every mutable field of a product.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub quantity: String,
    pub price: f64,
    pub location: Location,
    pub actor: Actor,
    pub image_url: String,
}

impl ProductUpdate {
    /// The full record this update produces for `id`.
    #[must_use]
    pub fn into_product(self, id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            location: self.location,
            actor: self.actor,
            image_url: self.image_url,
        }
    }
}

impl From<Product> for ProductUpdate {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            quantity: product.quantity,
            price: product.price,
            location: product.location,
            actor: product.actor,
            image_url: product.image_url,
        }
    }
}

// =============================================================================
// LEDGER RECORD
// =============================================================================

/// One entry of a full world-state listing.
///
/// Listings tolerate values that are not JSON and return their raw text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LedgerRecord {
    Json(Value),
    Raw(String),
}

impl LedgerRecord {
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
