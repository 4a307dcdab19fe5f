//! # Lifecycle Flows
//!
//! Per-id state machine driven end to end through the dispatcher:
//!
//! ```text
//! NonExistent ──CreateProduct──→ Exists ──Update/Transfer──→ Exists
//!      ↑                           │
//!      └──────DeleteProduct────────┘
//! ```

#[cfg(test)]
mod tests {
    use super::super::{args, create_args, fresh_ledger};
    use pl_02_product_contract::{ContractError, Product};
    use serde_json::Value;

    fn decode(payload: &str) -> Value {
        serde_json::from_str(payload).unwrap()
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_init_ledger_then_get_apple() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();

        let apple = decode(&ledger.evaluate("GetProduct", &args(&["1"])).await.unwrap().payload);
        assert_eq!(apple["name"], "Apple");
        assert_eq!(apple["price"].as_f64(), Some(30.0));
        assert_eq!(apple["id"], "1");
    }

    #[tokio::test]
    async fn test_create_delete_then_get_fails() {
        let ledger = fresh_ledger();
        ledger
            .submit("CreateProduct", &create_args("9", "Mango", "PRODUCER"))
            .await
            .unwrap();
        ledger.submit("DeleteProduct", &args(&["9"])).await.unwrap();

        let result = ledger.evaluate("GetProduct", &args(&["9"])).await;
        assert_eq!(result.unwrap_err(), ContractError::NotFound("9".into()));
        assert_eq!(
            ledger.evaluate("ProductExists", &args(&["9"])).await.unwrap().payload,
            "false"
        );
    }

    #[tokio::test]
    async fn test_transfer_producer_to_retailer() {
        let ledger = fresh_ledger();
        ledger
            .submit("CreateProduct", &create_args("10", "Mango", "PRODUCER"))
            .await
            .unwrap();
        let before = decode(&ledger.evaluate("GetProduct", &args(&["10"])).await.unwrap().payload);

        let previous = ledger
            .submit("TransferProduct", &args(&["10", "RETAILER"]))
            .await
            .unwrap();
        assert_eq!(previous.payload, "PRODUCER");

        let after = decode(&ledger.evaluate("GetProduct", &args(&["10"])).await.unwrap().payload);
        assert_eq!(after["actor"], "RETAILER");
        for field in ["id", "name", "quantity", "price", "location", "imageUrl"] {
            assert_eq!(after[field], before[field], "{field} changed on transfer");
        }
    }

    #[tokio::test]
    async fn test_transfer_chain_returns_each_previous_actor() {
        let ledger = fresh_ledger();
        ledger
            .submit("CreateProduct", &create_args("12", "Durian", "PRODUCER"))
            .await
            .unwrap();

        let mut holders = Vec::new();
        for next in ["RETAILER", "CONSUMER", "PRODUCER"] {
            let response = ledger
                .submit("TransferProduct", &args(&["12", next]))
                .await
                .unwrap();
            holders.push(response.payload);
        }
        assert_eq!(holders, ["PRODUCER", "RETAILER", "CONSUMER"]);
    }

    // =============================================================================
    // EXISTENCE RULES
    // =============================================================================

    #[tokio::test]
    async fn test_never_created_ids() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();

        for id in ["0", "7", "10", "apple"] {
            assert_eq!(
                ledger.evaluate("ProductExists", &args(&[id])).await.unwrap().payload,
                "false"
            );
            assert!(matches!(
                ledger.evaluate("GetProduct", &args(&[id])).await,
                Err(ContractError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_second_create_fails_already_exists() {
        let ledger = fresh_ledger();
        ledger
            .submit("CreateProduct", &create_args("X1", "Lychee", "PRODUCER"))
            .await
            .unwrap();
        assert_eq!(
            ledger.evaluate("ProductExists", &args(&["X1"])).await.unwrap().payload,
            "true"
        );

        let err = ledger
            .submit("CreateProduct", &create_args("X1", "Lychee", "RETAILER"))
            .await
            .unwrap_err();
        assert_eq!(err, ContractError::AlreadyExists("X1".into()));
    }

    #[tokio::test]
    async fn test_mutations_on_missing_id_leave_store_untouched() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();
        let before = ledger.store().snapshot().unwrap();

        let update = args(&["99", "1 kg", "1", "Ghost", r#"{"lat":0,"lng":0}"#, "PRODUCER", ""]);
        let attempts = [
            ledger.submit("UpdateProduct", &update).await,
            ledger.submit("DeleteProduct", &args(&["99"])).await,
            ledger.submit("TransferProduct", &args(&["99", "CONSUMER"])).await,
        ];

        for attempt in attempts {
            assert_eq!(attempt.unwrap_err(), ContractError::NotFound("99".into()));
        }
        assert_eq!(ledger.store().snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_ids_are_opaque_keys() {
        let ledger = fresh_ledger();

        let err = ledger
            .submit("CreateProduct", &create_args(" 9 ", "Mango", "PRODUCER"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::InvalidArgument(_)));
        assert!(ledger.store().is_empty().unwrap());

        ledger
            .submit("CreateProduct", &create_args("9", "Mango", "PRODUCER"))
            .await
            .unwrap();
        for (id, exists) in [("9", "true"), (" 9 ", "false"), ("", "false")] {
            assert_eq!(
                ledger.evaluate("ProductExists", &args(&[id])).await.unwrap().payload,
                exists,
                "ProductExists({id:?})"
            );
        }
        assert_eq!(
            ledger.evaluate("GetProduct", &args(&[""])).await.unwrap_err(),
            ContractError::NotFound(String::new())
        );
    }

    // =============================================================================
    // LISTING
    // =============================================================================

    #[tokio::test]
    async fn test_get_all_returns_live_records_in_key_order() {
        let ledger = fresh_ledger();
        assert_eq!(
            ledger.evaluate("GetAllProducts", &[]).await.unwrap().payload,
            "[]"
        );

        ledger.submit("InitLedger", &[]).await.unwrap();
        ledger
            .submit("CreateProduct", &create_args("11", "Mango", "PRODUCER"))
            .await
            .unwrap();
        ledger.submit("DeleteProduct", &args(&["3"])).await.unwrap();

        let listing = decode(&ledger.evaluate("GetAllProducts", &[]).await.unwrap().payload);
        let ids: Vec<&str> = listing
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["1", "11", "2", "4", "5", "6"]);

        let first: Product = serde_json::from_value(listing[0].clone()).unwrap();
        assert_eq!(first.name, "Apple");
    }

    #[tokio::test]
    async fn test_update_replaces_all_mutable_fields() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();

        ledger
            .submit(
                "UpdateProduct",
                &args(&[
                    "2",
                    "75 kg",
                    "16.5",
                    "Lady Finger Banana",
                    r#"{"lat":-8.65,"lng":115.2167}"#,
                    "CONSUMER",
                    "https://img/banana-2.jpg",
                ]),
            )
            .await
            .unwrap();

        let banana = decode(&ledger.evaluate("GetProduct", &args(&["2"])).await.unwrap().payload);
        assert_eq!(banana["id"], "2");
        assert_eq!(banana["name"], "Lady Finger Banana");
        assert_eq!(banana["quantity"], "75 kg");
        assert_eq!(banana["price"].as_f64(), Some(16.5));
        assert_eq!(banana["location"]["lat"].as_f64(), Some(-8.65));
        assert_eq!(banana["actor"], "CONSUMER");
        assert_eq!(banana["imageUrl"], "https://img/banana-2.jpg");
    }

    #[tokio::test]
    async fn test_init_ledger_restores_seed_values() {
        let ledger = fresh_ledger();
        ledger.submit("InitLedger", &[]).await.unwrap();
        ledger
            .submit("TransferProduct", &args(&["1", "CONSUMER"]))
            .await
            .unwrap();

        ledger.submit("InitLedger", &[]).await.unwrap();
        let apple = decode(&ledger.evaluate("GetProduct", &args(&["1"])).await.unwrap().payload);
        assert_eq!(apple["actor"], "PRODUCER");
    }
}
