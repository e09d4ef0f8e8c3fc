//! Repository trait definitions.
//!
//! The storage interface is split by concern: observations, calendar data,
//! and persisted report state. `FullRepository` is the convenience
//! supertrait handlers and services program against.

pub mod calendar;
pub mod error;
pub mod report_state;
pub mod status;

use async_trait::async_trait;

pub use calendar::CalendarRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use report_state::ReportStateRepository;
pub use status::StatusRepository;

/// Combined repository interface covering every storage concern.
#[async_trait]
pub trait FullRepository:
    StatusRepository + CalendarRepository + ReportStateRepository
{
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
