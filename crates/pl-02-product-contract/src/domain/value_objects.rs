//! # Value Objects
//!
//! Small immutable types making up a product record, each with its parse
//! rule for the positional string surface.

use crate::errors::{invalid, ContractError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// PRODUCT ID
// =============================================================================

/// Ids are opaque store keys: non-empty, no surrounding whitespace.
pub fn check_id(id: &str) -> Result<(), ContractError> {
    if id.is_empty() {
        return Err(invalid("product id must not be empty"));
    }
    if id.trim() != id {
        return Err(invalid(format!("product id {id:?} has surrounding whitespace")));
    }
    Ok(())
}

// =============================================================================
// ACTOR
// =============================================================================

/// Supply-chain role currently holding the product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Actor {
    Producer,
    Retailer,
    Consumer,
}

impl Actor {
    pub const ALL: [Actor; 3] = [Actor::Producer, Actor::Retailer, Actor::Consumer];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Producer => "PRODUCER",
            Self::Retailer => "RETAILER",
            Self::Consumer => "CONSUMER",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Actor {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|actor| actor.as_str() == s.trim())
            .ok_or_else(|| invalid(format!("unknown actor {s:?}, expected PRODUCER|RETAILER|CONSUMER")))
    }
}

// =============================================================================
// LOCATION
// =============================================================================

/// Geographic coordinates of the product's current holder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Build a location, checking both coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ContractError> {
        let location = Self { lat, lng }.normalized();
        location.validate()?;
        Ok(location)
    }

    /// Parse the `{"lat":..,"lng":..}` JSON text form.
    pub fn parse(text: &str) -> Result<Self, ContractError> {
        let location: Self = serde_json::from_str(text)
            .map_err(|e| invalid(format!("malformed location {text:?}: {e}")))?;
        let location = location.normalized();
        location.validate()?;
        Ok(location)
    }

    pub(crate) fn normalized(self) -> Self {
        Self {
            lat: positive_zero(self.lat),
            lng: positive_zero(self.lng),
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid(format!("latitude {} outside [-90, 90]", self.lat)));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(invalid(format!("longitude {} outside [-180, 180]", self.lng)));
        }
        Ok(())
    }
}

// =============================================================================
// PRICE
// =============================================================================

/// Parse a decimal price. Must be finite and non-negative.
pub fn parse_price(text: &str) -> Result<f64, ContractError> {
    let price: f64 = text
        .trim()
        .parse()
        .map_err(|_| invalid(format!("price {text:?} is not a number")))?;
    let price = positive_zero(price);
    check_price(price)?;
    Ok(price)
}

pub fn check_price(price: f64) -> Result<(), ContractError> {
    if !price.is_finite() || price < 0.0 {
        return Err(invalid(format!("price {price} must be a finite non-negative number")));
    }
    Ok(())
}

/// `-0.0` and `0.0` compare equal but encode differently.
pub(crate) fn positive_zero(value: f64) -> f64 {
    value + 0.0
}

// =============================================================================
// TESTS
// =============================================================================
