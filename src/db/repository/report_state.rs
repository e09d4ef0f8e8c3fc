//! Report-state repository trait for persisted job outcomes.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::ReportId;

/// Repository trait for the externally visible report state.
///
/// The persisted state is deliberately two-valued (`complete` or not): a
/// pending job and a failed job are indistinguishable at this boundary.
/// Richer job diagnostics live in the in-memory job tracker. The write must
/// be atomic per `report_id` so two terminal transitions cannot interleave.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ReportStateRepository: Send + Sync {
    /// Write the state for a report id, creating or overwriting it.
    async fn set_report_complete(
        &self,
        report_id: &ReportId,
        complete: bool,
    ) -> RepositoryResult<()>;

    /// Read the state for a report id.
    ///
    /// # Returns
    /// * `Ok(None)` - The report id was never registered
    /// * `Ok(Some(bool))` - Whether the report completed
    async fn is_report_complete(&self, report_id: &ReportId) -> RepositoryResult<Option<bool>>;
}
