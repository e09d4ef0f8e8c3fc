//! Status repository trait for observation storage and queries.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::error::RepositoryResult;
use crate::api::StoreId;
use crate::models::Observation;

/// Repository trait for status observations.
///
/// Observations form an append-only sequence per store, keyed by
/// `(store_id, timestamp_utc)`: re-inserting an existing key overwrites the
/// earlier status.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Insert a batch of observations.
    ///
    /// # Arguments
    /// * `rows` - Observations to insert; duplicates within or across
    ///   batches resolve last-write-wins
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows accepted
    /// * `Err(RepositoryError)` - If the operation fails
    async fn insert_observations(&self, rows: Vec<Observation>) -> RepositoryResult<usize>;

    /// Fetch all observations for one store, sorted ascending by timestamp.
    ///
    /// # Arguments
    /// * `store_id` - The store to query
    ///
    /// # Returns
    /// * `Ok(Vec<Observation>)` - Sorted observation sequence (possibly empty)
    /// * `Err(RepositoryError)` - If the operation fails
    async fn observations_for_store(&self, store_id: &StoreId)
        -> RepositoryResult<Vec<Observation>>;

    /// All store ids that have at least one observation, in first-seen order.
    async fn observation_store_ids(&self) -> RepositoryResult<Vec<StoreId>>;

    /// The global maximum observation timestamp across all stores.
    ///
    /// # Returns
    /// * `Ok(None)` - When no observation exists anywhere
    async fn latest_observation_at(&self) -> RepositoryResult<Option<NaiveDateTime>>;
}
