//! Fixed catalog written by `InitLedger` under keys `"1"..="6"`.

use crate::domain::entities::Product;
use crate::domain::value_objects::{Actor, Location};

struct SeedEntry {
    name: &'static str,
    quantity: &'static str,
    price: f64,
    lat: f64,
    lng: f64,
    actor: Actor,
    image: &'static str,
}

const CATALOG: [SeedEntry; 6] = [
    SeedEntry {
        name: "Apple",
        quantity: "100 kg",
        price: 30.0,
        lat: 10.776_889,
        lng: 106.700_806,
        actor: Actor::Producer,
        image: "apple.jpg",
    },
    SeedEntry {
        name: "Banana",
        quantity: "50 kg",
        price: 15.0,
        lat: 10.045_162,
        lng: 105.746_857,
        actor: Actor::Producer,
        image: "banana.jpg",
    },
    SeedEntry {
        name: "Carrot",
        quantity: "20 kg",
        price: 12.0,
        lat: 11.940_419,
        lng: 108.458_313,
        actor: Actor::Retailer,
        image: "carrot.jpg",
    },
    SeedEntry {
        name: "Milk",
        quantity: "40 l",
        price: 25.0,
        lat: 10.980_460,
        lng: 106.651_940,
        actor: Actor::Retailer,
        image: "milk.jpg",
    },
    SeedEntry {
        name: "Rice",
        quantity: "500 kg",
        price: 18.0,
        lat: 10.375_897,
        lng: 105.418_470,
        actor: Actor::Producer,
        image: "rice.jpg",
    },
    SeedEntry {
        name: "Coffee",
        quantity: "10 kg",
        price: 120.0,
        lat: 12.666_667,
        lng: 108.050_000,
        actor: Actor::Consumer,
        image: "coffee.jpg",
    },
];

const IMAGE_BASE: &str = "https://images.provenance-ledger.dev/products/";

/// The seed products, ids assigned in catalog order starting at `"1"`.
#[must_use]
pub fn seed_catalog() -> Vec<Product> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, entry)| Product {
            id: (index + 1).to_string(),
            name: entry.name.to_string(),
            quantity: entry.quantity.to_string(),
            price: entry.price,
            location: Location {
                lat: entry.lat,
                lng: entry.lng,
            },
            actor: entry.actor,
            image_url: format!("{IMAGE_BASE}{}", entry.image),
        })
        .collect()
}
