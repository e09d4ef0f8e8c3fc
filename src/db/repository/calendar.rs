//! Calendar repository trait for business-hours and timezone data.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::StoreId;
use crate::models::{BusinessHoursEntry, TimezoneEntry};

/// Repository trait for weekly business-hours calendars and timezone
/// assignments.
///
/// A store may have zero entries (treated as continuously open downstream),
/// one, or up to seven. Timezones default to `America/Chicago` when absent;
/// the fallback is applied by the calendar resolver, not here.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Insert a batch of business-hours entries.
    async fn insert_business_hours(&self, rows: Vec<BusinessHoursEntry>)
        -> RepositoryResult<usize>;

    /// Insert a batch of timezone assignments.
    ///
    /// Re-inserting a store id overwrites its earlier assignment.
    async fn insert_timezones(&self, rows: Vec<TimezoneEntry>) -> RepositoryResult<usize>;

    /// Fetch the full business-hours table.
    async fn all_business_hours(&self) -> RepositoryResult<Vec<BusinessHoursEntry>>;

    /// Fetch the full timezone table.
    async fn all_timezones(&self) -> RepositoryResult<Vec<TimezoneEntry>>;

    /// Fetch the business-hours entries for one store.
    async fn business_hours_for_store(
        &self,
        store_id: &StoreId,
    ) -> RepositoryResult<Vec<BusinessHoursEntry>>;

    /// Store ids known only through calendar data: the union of ids
    /// appearing in the business-hours and timezone tables, in first-seen
    /// order.
    async fn calendar_store_ids(&self) -> RepositoryResult<Vec<StoreId>>;
}
