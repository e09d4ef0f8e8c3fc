//! Bulk CSV dataset ingestion.
//!
//! Loads the three dataset files (status polls, business hours, timezones)
//! from a data directory into the repository. Header names are normalized
//! by fuzzy matching, status tokens and timestamps are parsed leniently,
//! and malformed rows are dropped with per-file accounting rather than
//! failing the load. A missing file is skipped with a warning; an
//! unreadable one fails the ingest job.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::warn;

use crate::api::StoreId;
use crate::db::{CalendarRepository, FullRepository, RepositoryError, StatusRepository};
use crate::models::time::parse_timestamp_utc;
use crate::models::{BusinessHoursEntry, Observation, TimezoneEntry};
use crate::services::calendar::DEFAULT_TIMEZONE;
use crate::services::job_tracker::{JobTracker, LogLevel};

/// Expected file names inside the data directory.
pub const STORE_STATUS_FILE: &str = "store_status.csv";
pub const MENU_HOURS_FILE: &str = "menu_hours.csv";
pub const TIMEZONES_FILE: &str = "timezones.csv";

/// Error type for dataset ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is missing required columns: {missing}")]
    MissingColumns { path: PathBuf, missing: String },

    #[error("ingest worker failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Row accounting for one ingested file.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct FileStats {
    /// Whether the file was present in the data directory.
    pub found: bool,
    /// Rows read from the file.
    pub total: usize,
    /// Rows that survived normalization and parsing.
    pub kept: usize,
}

/// Accounting for a full dataset load.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct IngestSummary {
    pub store_status: FileStats,
    pub menu_hours: FileStats,
    pub timezones: FileStats,
}

fn find_column(headers: &StringRecord, matches: impl Fn(&str) -> bool) -> Option<usize> {
    headers
        .iter()
        .position(|header| matches(&header.trim().to_ascii_lowercase()))
}

fn read_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Map a raw status token onto a boolean, `None` when unrecognized.
pub fn map_status_token(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "active" | "true" | "1" => Some(true),
        "inactive" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Read and normalize a status-polls CSV.
pub fn read_store_status(path: &Path) -> Result<(Vec<Observation>, FileStats), IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(path, e))?;
    let headers = reader.headers().map_err(|e| read_error(path, e))?.clone();

    let store_col = find_column(&headers, |h| h.contains("store") && h.contains("id"));
    let timestamp_col = find_column(&headers, |h| h.contains("timestamp") && h.contains("utc"));
    let status_col = find_column(&headers, |h| h == "status");

    let (Some(store_col), Some(timestamp_col), Some(status_col)) =
        (store_col, timestamp_col, status_col)
    else {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            missing: "store_id, timestamp_utc, status".to_string(),
        });
    };

    let mut rows = Vec::new();
    let mut stats = FileStats {
        found: true,
        ..FileStats::default()
    };

    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, e))?;
        stats.total += 1;

        let store_id = match record.get(store_col).map(str::trim) {
            Some(id) if !id.is_empty() => StoreId::new(id),
            _ => continue,
        };
        let Some(timestamp_utc) = record.get(timestamp_col).and_then(parse_timestamp_utc) else {
            continue;
        };
        let Some(status) = record.get(status_col).and_then(map_status_token) else {
            continue;
        };

        rows.push(Observation {
            store_id,
            timestamp_utc,
            status,
        });
        stats.kept += 1;
    }

    Ok((rows, stats))
}

/// Read and normalize a business-hours CSV.
///
/// `day_of_week` must be numeric and in 0-6; start/end time strings are
/// kept raw for the calendar resolver.
pub fn read_menu_hours(path: &Path) -> Result<(Vec<BusinessHoursEntry>, FileStats), IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(path, e))?;
    let headers = reader.headers().map_err(|e| read_error(path, e))?.clone();

    let store_col = find_column(&headers, |h| h.contains("store") && h.contains("id"));
    let day_col = find_column(&headers, |h| {
        h.contains("day") && (h.contains("week") || h.contains("of"))
    });
    let start_col = find_column(&headers, |h| h.contains("start") && h.contains("time"));
    let end_col = find_column(&headers, |h| h.contains("end") && h.contains("time"));

    let (Some(store_col), Some(day_col), Some(start_col), Some(end_col)) =
        (store_col, day_col, start_col, end_col)
    else {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            missing: "store_id, day_of_week, start_time_local, end_time_local".to_string(),
        });
    };

    let mut rows = Vec::new();
    let mut stats = FileStats {
        found: true,
        ..FileStats::default()
    };

    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, e))?;
        stats.total += 1;

        let store_id = match record.get(store_col).map(str::trim) {
            Some(id) if !id.is_empty() => StoreId::new(id),
            _ => continue,
        };
        let Some(day_of_week) = record
            .get(day_col)
            .and_then(|field| field.trim().parse::<f64>().ok())
            .filter(|day| (0.0..=6.0).contains(day))
            .map(|day| day as u8)
        else {
            continue;
        };
        let (Some(start), Some(end)) = (record.get(start_col), record.get(end_col)) else {
            continue;
        };

        rows.push(BusinessHoursEntry {
            store_id,
            day_of_week,
            start_time_local: start.trim().to_string(),
            end_time_local: end.trim().to_string(),
        });
        stats.kept += 1;
    }

    Ok((rows, stats))
}

/// Read and normalize a timezones CSV.
///
/// When the file has no timezone column, or a row's value is blank, the
/// default timezone is assigned.
pub fn read_timezones(path: &Path) -> Result<(Vec<TimezoneEntry>, FileStats), IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(path, e))?;
    let headers = reader.headers().map_err(|e| read_error(path, e))?.clone();

    let store_col = find_column(&headers, |h| h.contains("store") && h.contains("id"));
    let timezone_col = find_column(&headers, |h| h.contains("timezone") || h.contains("tz"));

    let Some(store_col) = store_col else {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            missing: "store_id".to_string(),
        });
    };

    let mut rows = Vec::new();
    let mut stats = FileStats {
        found: true,
        ..FileStats::default()
    };

    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, e))?;
        stats.total += 1;

        let store_id = match record.get(store_col).map(str::trim) {
            Some(id) if !id.is_empty() => StoreId::new(id),
            _ => continue,
        };
        let timezone_str = timezone_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE)
            .to_string();

        rows.push(TimezoneEntry {
            store_id,
            timezone_str,
        });
        stats.kept += 1;
    }

    Ok((rows, stats))
}

/// Load all three dataset files from `data_dir` into the repository.
///
/// Missing files are skipped with a warning (their stats report
/// `found: false`); unreadable or column-less files fail the load.
pub async fn load_dataset(
    repo: &dyn FullRepository,
    data_dir: &Path,
) -> Result<IngestSummary, IngestError> {
    let mut summary = IngestSummary::default();

    let status_path = data_dir.join(STORE_STATUS_FILE);
    if status_path.exists() {
        let (rows, stats) = tokio::task::spawn_blocking(move || read_store_status(&status_path))
            .await
            .map_err(|e| IngestError::Worker(e.to_string()))??;
        repo.insert_observations(rows).await?;
        summary.store_status = stats;
    } else {
        warn!(path = %status_path.display(), "dataset file not found, skipping");
    }

    let hours_path = data_dir.join(MENU_HOURS_FILE);
    if hours_path.exists() {
        let (rows, stats) = tokio::task::spawn_blocking(move || read_menu_hours(&hours_path))
            .await
            .map_err(|e| IngestError::Worker(e.to_string()))??;
        repo.insert_business_hours(rows).await?;
        summary.menu_hours = stats;
    } else {
        warn!(path = %hours_path.display(), "dataset file not found, skipping");
    }

    let tz_path = data_dir.join(TIMEZONES_FILE);
    if tz_path.exists() {
        let (rows, stats) = tokio::task::spawn_blocking(move || read_timezones(&tz_path))
            .await
            .map_err(|e| IngestError::Worker(e.to_string()))??;
        repo.insert_timezones(rows).await?;
        summary.timezones = stats;
    } else {
        warn!(path = %tz_path.display(), "dataset file not found, skipping");
    }

    Ok(summary)
}

/// Run a dataset load as a tracked background job.
pub async fn run_ingest_job(
    job_id: String,
    tracker: JobTracker,
    repo: std::sync::Arc<dyn FullRepository>,
    data_dir: PathBuf,
) -> Result<IngestSummary, String> {
    tracker.log(
        &job_id,
        LogLevel::Info,
        format!("Loading dataset from {}...", data_dir.display()),
    );

    match load_dataset(repo.as_ref(), &data_dir).await {
        Ok(summary) => {
            for (name, stats) in [
                (STORE_STATUS_FILE, summary.store_status),
                (MENU_HOURS_FILE, summary.menu_hours),
                (TIMEZONES_FILE, summary.timezones),
            ] {
                if stats.found {
                    tracker.log(
                        &job_id,
                        LogLevel::Success,
                        format!("✓ {}: kept {}/{} rows", name, stats.kept, stats.total),
                    );
                } else {
                    tracker.log(
                        &job_id,
                        LogLevel::Warning,
                        format!("{} not found, skipped", name),
                    );
                }
            }

            let result = serde_json::to_value(summary).ok();
            tracker.complete_job(&job_id, result);
            Ok(summary)
        }
        Err(e) => {
            let message = format!("Dataset load failed: {}", e);
            tracker.fail_job(&job_id, &message);
            Err(message)
        }
    }
}
