//! In-memory implementation of DonorStore for testing and development

use crate::core::donor::{Donor, DonorFields, NewDonor};
use crate::core::error::{StoreError, StoreResult};
use crate::core::store::DonorStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Donor>,
    next_id: i64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory donor store
///
/// Ids are handed out from a counter that never goes backwards, so deleted
/// ids are not reused. `generated_id` uniqueness is checked under the write
/// lock, which makes concurrent colliding inserts resolve to one winner.
#[derive(Clone, Default)]
pub struct InMemoryDonorStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryDonorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonorStore for InMemoryDonorStore {
    async fn list_all(&self) -> StoreResult<Vec<Donor>> {
        let table = self
            .table
            .read()
            .map_err(|e| StoreError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Donor> {
        let table = self
            .table
            .read()
            .map_err(|e| StoreError::storage(format!("Failed to acquire read lock: {}", e)))?;

        table
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn insert(&self, donor: NewDonor) -> StoreResult<Donor> {
        let mut table = self
            .table
            .write()
            .map_err(|e| StoreError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if table
            .rows
            .values()
            .any(|existing| existing.generated_id == donor.generated_id)
        {
            return Err(StoreError::conflict(format!(
                "generatedId '{}' is already in use",
                donor.generated_id
            )));
        }

        let id = table.next_id;
        table.next_id += 1;

        let donor = donor.into_donor(id);
        table.rows.insert(id, donor.clone());

        Ok(donor)
    }

    async fn update(&self, id: i64, fields: DonorFields) -> StoreResult<Donor> {
        let mut table = self
            .table
            .write()
            .map_err(|e| StoreError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let donor = table
            .rows
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;
        donor.apply(fields);

        Ok(donor.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut table = self
            .table
            .write()
            .map_err(|e| StoreError::storage(format!("Failed to acquire write lock: {}", e)))?;

        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    async fn ping(&self) -> StoreResult<()> {
        self.table
            .read()
            .map(|_| ())
            .map_err(|e| StoreError::storage(format!("Failed to acquire read lock: {}", e)))
    }
}
