//! Public API surface for the storewatch backend.
//!
//! This file consolidates the identifier newtypes used across the crate and
//! re-exports the domain/DTO types for consumers.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::BusinessHoursEntry;
pub use crate::models::Observation;
pub use crate::models::ReportRow;
pub use crate::models::TimezoneEntry;
pub use crate::services::calendar::CalendarProfile;
pub use crate::services::job_tracker::{Job, JobStatus, LogEntry, LogLevel};

use serde::{Deserialize, Serialize};

/// Store identifier (opaque, as provided by the ingested data).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub String);

/// Report identifier (one asynchronous report job per id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl StoreId {
    pub fn new(value: impl Into<String>) -> Self {
        StoreId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ReportId {
    pub fn new(value: impl Into<String>) -> Self {
        ReportId(value.into())
    }

    /// Generate a fresh random report id.
    pub fn generate() -> Self {
        ReportId(uuid::Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StoreId {
    fn from(value: &str) -> Self {
        StoreId(value.to_string())
    }
}

impl From<&str> for ReportId {
    fn from(value: &str) -> Self {
        ReportId(value.to_string())
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
