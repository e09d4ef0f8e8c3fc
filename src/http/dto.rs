//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The domain types are re-exported from the api module since they already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Domain
    BusinessHoursEntry,
    Observation,
    ReportId,
    ReportRow,
    StoreId,
    TimezoneEntry,
};

/// Request body for triggering a dataset ingest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Directory to load the dataset CSVs from (default: configured data dir)
    #[serde(default)]
    pub data_dir: Option<String>,
}

/// Response for a triggered dataset ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Job ID for tracking the async load
    pub job_id: String,
    /// Message about the operation
    pub message: String,
}

/// Response for a triggered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerReportResponse {
    /// Report ID used to poll and download the artifact
    pub report_id: String,
    /// Job ID for tracking the async generation
    pub job_id: String,
    /// Message about the operation
    pub message: String,
}

/// Status response for a report id.
///
/// `status` is `"Complete"` once the CSV artifact exists, `"Running"`
/// otherwise; a failed generation keeps reporting `"Running"` here (the
/// job endpoints expose the richer status).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatusResponse {
    pub status: String,
    pub report_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Job status response for async processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID
    pub job_id: String,
    /// Job status
    pub status: String,
    /// Log entries
    pub logs: Vec<crate::services::job_tracker::LogEntry>,
    /// Result if completed
    pub result: Option<serde_json::Value>,
    /// Failure reason if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
