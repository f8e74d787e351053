//! Storage trait for donor records

use crate::core::donor::{Donor, DonorFields, NewDonor};
use crate::core::error::StoreResult;
use async_trait::async_trait;

/// Durable storage of [`Donor`] records addressed by `id`
///
/// Implementations own their connection or lock discipline; callers never
/// hold anything across calls. Every method reports failures as
/// [`StoreError`](crate::core::error::StoreError).
#[async_trait]
pub trait DonorStore: Send + Sync {
    /// Every stored donor, ascending by `id`
    async fn list_all(&self) -> StoreResult<Vec<Donor>>;

    /// Fetch one donor, `NotFound` if absent
    async fn find_by_id(&self, id: i64) -> StoreResult<Donor>;

    /// Persist a new donor and return it with its assigned `id`
    ///
    /// A `generated_id` already in use yields `Conflict`.
    async fn insert(&self, donor: NewDonor) -> StoreResult<Donor>;

    /// Replace the mutable fields of an existing donor
    async fn update(&self, id: i64, fields: DonorFields) -> StoreResult<Donor>;

    /// Remove a donor, `NotFound` if absent
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> StoreResult<()>;
}
