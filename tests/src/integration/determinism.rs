//! # Determinism
//!
//! Independent nodes re-execute every transaction and must agree on its
//! effects byte for byte. Covered here:
//!
//! - every stored value is canonical JSON, whatever path wrote it
//! - two replicas produce equal write-set digests for the same invocations
//! - logically equal records encode identically regardless of field order

#[cfg(test)]
mod tests {
    use super::super::{args, create_args, fresh_ledger};
    use pl_01_world_state::InMemoryWorldState;
    use pl_02_product_contract::{is_canonical, to_canonical_json, Dispatcher, Product};
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    fn workload() -> Vec<(&'static str, Vec<String>)> {
        vec![
            ("InitLedger", Vec::new()),
            ("CreateProduct", create_args("20", "Jackfruit", "PRODUCER")),
            ("TransferProduct", args(&["20", "RETAILER"])),
            (
                "UpdateProduct",
                args(&[
                    "4",
                    "35 l",
                    "26",
                    "Fresh Milk",
                    r#"{"lng":106.65,"lat":10.98}"#,
                    "CONSUMER",
                    "",
                ]),
            ),
            ("DeleteProduct", args(&["5"])),
            ("TransferProduct", args(&["1", "RETAILER"])),
        ]
    }

    async fn run_workload(ledger: &Dispatcher<InMemoryWorldState>) -> Vec<String> {
        let mut digests = Vec::new();
        for (function, call_args) in workload() {
            let response = ledger.submit(function, &call_args).await.unwrap();
            digests.push(response.write_set_digest);
        }
        digests
    }

    #[tokio::test]
    async fn test_replicas_agree_on_write_sets() {
        let replica_a = fresh_ledger();
        let replica_b = fresh_ledger();

        let digests_a = run_workload(&replica_a).await;
        let digests_b = run_workload(&replica_b).await;

        assert_eq!(digests_a, digests_b);
        assert_eq!(
            replica_a.store().snapshot().unwrap(),
            replica_b.store().snapshot().unwrap()
        );
    }

    #[tokio::test]
    async fn test_every_stored_value_is_canonical() {
        let ledger = fresh_ledger();
        run_workload(&ledger).await;

        let snapshot = ledger.store().snapshot().unwrap();
        assert_eq!(snapshot.entries.len(), 6);
        for (key, value) in &snapshot.entries {
            let bytes = hex::decode(value).unwrap();
            assert!(is_canonical(&bytes), "value under {key} is not canonical");
            let product = Product::from_stored(key, &bytes).unwrap();
            assert_eq!(&product.id, key);
        }
    }

    #[tokio::test]
    async fn test_location_key_order_in_input_does_not_leak() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();

        let mut payloads = Vec::new();
        for location in [r#"{"lat":10.98,"lng":106.65}"#, r#"{"lng":106.65,"lat":10.98}"#] {
            ledger
                .submit(
                    "UpdateProduct",
                    &args(&["4", "35 l", "26", "Fresh Milk", location, "CONSUMER", ""]),
                )
                .await
                .unwrap();
            payloads.push(ledger.evaluate("GetProduct", &args(&["4"])).await.unwrap().payload);
        }
        assert_eq!(payloads[0], payloads[1]);
    }

    #[tokio::test]
    async fn test_signed_zero_inputs_store_identical_bytes() {
        let mut payloads = Vec::new();
        for (price, location) in [
            ("0", r#"{"lat":0,"lng":0.0}"#),
            ("-0", r#"{"lat":-0.0,"lng":-0}"#),
        ] {
            let ledger = fresh_ledger();
            ledger
                .submit(
                    "CreateProduct",
                    &args(&["Free Sample", "Z1", "1 box", price, location, "RETAILER", ""]),
                )
                .await
                .unwrap();
            payloads.push(ledger.evaluate("GetProduct", &args(&["Z1"])).await.unwrap().payload);
        }
        assert_eq!(payloads[0], payloads[1]);
        assert!(payloads[0].contains(r#""price":0.0"#));
    }

    fn product_strategy() -> impl Strategy<Value = Product> {
        (
            "[0-9A-Za-z]{1,12}",
            "[ -~]{0,24}",
            "[ -~]{0,12}",
            0.0f64..1.0e6,
            -90.0f64..=90.0,
            -180.0f64..=180.0,
            0usize..3,
            "[ -~]{0,40}",
        )
            .prop_map(|(id, name, quantity, price, lat, lng, actor, image_url)| Product {
                id,
                name,
                quantity,
                price,
                location: pl_02_product_contract::Location { lat, lng },
                actor: pl_02_product_contract::Actor::ALL[actor],
                image_url,
            })
    }

    proptest! {
        #[test]
        fn prop_field_order_does_not_change_bytes(
            product in product_strategy(),
            rotation in 0usize..7,
        ) {
            let fields: Vec<(&str, Value)> = vec![
                ("id", json!(product.id)),
                ("name", json!(product.name)),
                ("quantity", json!(product.quantity)),
                ("price", json!(product.price)),
                ("location", json!({ "lng": product.location.lng, "lat": product.location.lat })),
                ("actor", json!(product.actor)),
                ("imageUrl", json!(product.image_url)),
            ];

            let mut rotated = fields.clone();
            rotated.rotate_left(rotation);
            let mut built = Map::new();
            for (key, value) in rotated.into_iter().rev() {
                built.insert(key.to_string(), value);
            }

            let from_map = to_canonical_json(&Value::Object(built)).unwrap();
            let from_struct = product.to_bytes().unwrap();
            prop_assert_eq!(&from_map, &from_struct);
            prop_assert!(is_canonical(&from_struct));

            let decoded = Product::from_stored(&product.id, &from_struct).unwrap();
            prop_assert_eq!(&decoded.name, &product.name);
            prop_assert_eq!(&decoded.actor, &product.actor);
        }
    }
}
