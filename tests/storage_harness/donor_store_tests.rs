//! Macro-generated test suite for `DonorStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use donor_registry::storage::InMemoryDonorStore;
//!
//! donor_store_tests!(InMemoryDonorStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_find`: insert then retrieve, verify all fields
//! - `test_find_nonexistent`: unknown id is `NotFound`
//! - `test_list_empty` / `test_list_ordered_by_id`
//! - `test_update_existing`: fields replaced, identity kept
//! - `test_update_nonexistent` / `test_delete_nonexistent`
//! - `test_delete_existing`: delete then find is `NotFound`
//!
//! ## Constraints
//! - `test_duplicate_generated_id_conflicts`
//! - `test_concurrent_duplicate_inserts`: one winner, one `Conflict`
//! - `test_ping`

/// Generate a full `DonorStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store implementing
/// `DonorStore + Clone + 'static`. It is re-evaluated for each test.
#[macro_export]
macro_rules! donor_store_tests {
    ($factory:expr) => {
        mod donor_store_contract_tests {
            use super::*;
            use donor_registry::core::error::StoreError;
            use donor_registry::core::store::DonorStore;

            // ==================================================================
            // CRUD - Insert & Find
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_find() {
                let store = $factory;

                let created = store
                    .insert(sample_donor("DN-STORE-001", "Alice Moreau"))
                    .await
                    .unwrap();
                assert!(created.id > 0);
                assert_eq!(created.generated_id, "DN-STORE-001");
                assert_eq!(created.full_name, "Alice Moreau");

                let found = store.find_by_id(created.id).await.unwrap();
                assert_eq!(found, created);
                assert_eq!(found.birth_date, date(1990, 5, 17));
                assert_eq!(found.address.as_deref(), Some("12 Harbor Road"));
                assert_eq!(found.number_of_donations, 2);
            }

            #[tokio::test]
            async fn test_insert_without_address() {
                let store = $factory;
                let mut donor = sample_donor("DN-STORE-002", "Bao Tran");
                donor.fields.address = None;

                let created = store.insert(donor).await.unwrap();
                let found = store.find_by_id(created.id).await.unwrap();
                assert_eq!(found.address, None);
            }

            #[tokio::test]
            async fn test_find_nonexistent() {
                let store = $factory;

                let result = store.find_by_id(987_654).await;
                assert_eq!(result, Err(StoreError::NotFound { id: 987_654 }));
            }

            // ==================================================================
            // CRUD - List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;

                let all = store.list_all().await.unwrap();
                assert!(all.is_empty(), "List on empty store should return empty vec");
            }

            #[tokio::test]
            async fn test_list_ordered_by_id() {
                let store = $factory;

                for donor in sample_batch(5) {
                    store.insert(donor).await.unwrap();
                }

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 5);

                let ids: Vec<i64> = all.iter().map(|d| d.id).collect();
                let mut sorted = ids.clone();
                sorted.sort();
                assert_eq!(ids, sorted, "List should be ascending by id");
            }

            // ==================================================================
            // CRUD - Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let created = store
                    .insert(sample_donor("DN-STORE-010", "Carla Ruiz"))
                    .await
                    .unwrap();

                let mut fields = sample_fields("Carla Ruiz-Ortega");
                fields.phone = "+34 600 000 000".to_string();
                fields.address = None;
                fields.number_of_donations = 9;

                let updated = store.update(created.id, fields).await.unwrap();
                assert_eq!(updated.id, created.id);
                assert_eq!(updated.generated_id, "DN-STORE-010");
                assert_eq!(updated.full_name, "Carla Ruiz-Ortega");
                assert_eq!(updated.address, None);
                assert_eq!(updated.number_of_donations, 9);

                let found = store.find_by_id(created.id).await.unwrap();
                assert_eq!(found, updated);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;

                let result = store.update(55_555, sample_fields("Nobody")).await;
                assert_eq!(result, Err(StoreError::NotFound { id: 55_555 }));
            }

            // ==================================================================
            // CRUD - Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let created = store
                    .insert(sample_donor("DN-STORE-020", "Dario Fo"))
                    .await
                    .unwrap();

                store.delete(created.id).await.unwrap();

                let result = store.find_by_id(created.id).await;
                assert_eq!(result, Err(StoreError::NotFound { id: created.id }));
                assert!(store.list_all().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;

                let result = store.delete(44_444).await;
                assert_eq!(result, Err(StoreError::NotFound { id: 44_444 }));
            }

            // ==================================================================
            // Constraints
            // ==================================================================

            #[tokio::test]
            async fn test_duplicate_generated_id_conflicts() {
                let store = $factory;

                store
                    .insert(sample_donor("DN-DUPLICATE", "First"))
                    .await
                    .unwrap();
                let result = store.insert(sample_donor("DN-DUPLICATE", "Second")).await;

                assert!(
                    matches!(result, Err(StoreError::Conflict { .. })),
                    "Duplicate generated id should conflict, got {:?}",
                    result
                );
                assert_eq!(store.list_all().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_duplicate_inserts() {
                let store = $factory;
                let s1 = store.clone();
                let s2 = store.clone();

                let h1 = tokio::spawn(async move {
                    s1.insert(sample_donor("DN-RACE", "Racer One")).await
                });
                let h2 = tokio::spawn(async move {
                    s2.insert(sample_donor("DN-RACE", "Racer Two")).await
                });

                let r1 = h1.await.unwrap();
                let r2 = h2.await.unwrap();

                let successes = [&r1, &r2].iter().filter(|r| r.is_ok()).count();
                let conflicts = [&r1, &r2]
                    .iter()
                    .filter(|r| matches!(r, Err(StoreError::Conflict { .. })))
                    .count();
                assert_eq!(successes, 1);
                assert_eq!(conflicts, 1);
                assert_eq!(store.list_all().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_ping() {
                let store = $factory;
                store.ping().await.unwrap();
            }
        }
    };
}
