//! Batch report generation.
//!
//! Loads an immutable snapshot of observations and calendar data, computes
//! one report row per store in fixed-size batches on blocking workers, and
//! writes the CSV artifact. Runs as a tracked background job: any failure
//! is caught here, marked on the job, and persisted as a not-complete
//! report state rather than propagating.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::api::{ReportId, StoreId};
use crate::db::{
    CalendarRepository, FullRepository, ReportStateRepository, RepositoryResult, StatusRepository,
};
use crate::models::{BusinessHoursEntry, Observation, ReportRow};
use crate::services::calendar::resolve_calendar;
use crate::services::job_tracker::{JobTracker, LogLevel};
use crate::services::uptime::compute_store_report;

/// Stores processed per batch; bounds peak memory and worker fan-out.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Immutable snapshot of everything one report run needs.
///
/// The reference instant is fixed at load time and threaded unchanged into
/// every per-store computation, so a report is reproducible regardless of
/// when it runs or how stale ingestion is.
pub struct ReportDataset {
    store_ids: Vec<StoreId>,
    observations: HashMap<StoreId, Vec<Observation>>,
    business_hours: HashMap<StoreId, Vec<BusinessHoursEntry>>,
    timezones: HashMap<StoreId, String>,
    generated_at: NaiveDateTime,
}

impl ReportDataset {
    /// Load a snapshot from the repository.
    ///
    /// The store universe is the set of stores with observations, in
    /// first-seen order; when no observations exist anywhere it falls back
    /// to the union of store ids in the calendar and timezone tables. The
    /// reference instant is the global maximum observation timestamp, or
    /// the wall clock if there are no observations at all.
    pub async fn load(repo: &dyn FullRepository) -> RepositoryResult<Self> {
        let mut store_ids = repo.observation_store_ids().await?;

        let mut observations = HashMap::with_capacity(store_ids.len());
        for store_id in &store_ids {
            let series = repo.observations_for_store(store_id).await?;
            observations.insert(store_id.clone(), series);
        }

        let mut business_hours: HashMap<StoreId, Vec<BusinessHoursEntry>> = HashMap::new();
        for entry in repo.all_business_hours().await? {
            business_hours
                .entry(entry.store_id.clone())
                .or_default()
                .push(entry);
        }

        let mut timezones = HashMap::new();
        for assignment in repo.all_timezones().await? {
            timezones.insert(assignment.store_id, assignment.timezone_str);
        }

        if store_ids.is_empty() {
            store_ids = repo.calendar_store_ids().await?;
        }

        let generated_at = match repo.latest_observation_at().await? {
            Some(timestamp) => timestamp,
            None => chrono::Utc::now().naive_utc(),
        };

        Ok(Self {
            store_ids,
            observations,
            business_hours,
            timezones,
            generated_at,
        })
    }

    /// The shared reference instant all windows end at.
    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// Number of stores the report will cover.
    pub fn store_count(&self) -> usize {
        self.store_ids.len()
    }

    /// Compute the report row for one store in the snapshot.
    pub fn build_store_row(&self, store_id: &StoreId) -> ReportRow {
        let entries = self
            .business_hours
            .get(store_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let profile = resolve_calendar(entries, self.timezones.get(store_id).map(String::as_str));
        let observations = self
            .observations
            .get(store_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        compute_store_report(store_id, observations, &profile, self.generated_at)
    }
}

/// Compute all report rows, batch by batch.
///
/// Each batch fans out one blocking task per store (the per-store builder
/// is pure, so stores never contend); rows come back concatenated in the
/// snapshot's first-seen store order. A panicked store task fails the whole
/// computation so the caller can mark the job failed.
pub async fn compute_report_rows(
    dataset: Arc<ReportDataset>,
    batch_size: usize,
) -> Result<Vec<ReportRow>, String> {
    let batch_size = batch_size.max(1);
    let total_batches = dataset.store_ids.len().div_ceil(batch_size);
    let mut rows = Vec::with_capacity(dataset.store_ids.len());

    for (batch_index, batch) in dataset.store_ids.chunks(batch_size).enumerate() {
        let handles: Vec<_> = batch
            .iter()
            .cloned()
            .map(|store_id| {
                let dataset = Arc::clone(&dataset);
                tokio::task::spawn_blocking(move || dataset.build_store_row(&store_id))
            })
            .collect();

        for handle in handles {
            let row = handle
                .await
                .map_err(|e| format!("store computation failed: {}", e))?;
            rows.push(row);
        }

        info!(
            "Processed batch {}/{} ({} stores)",
            batch_index + 1,
            total_batches,
            batch.len()
        );
    }

    Ok(rows)
}

/// Path of the CSV artifact for a report id.
pub fn report_file_path(report_dir: &Path, report_id: &ReportId) -> PathBuf {
    report_dir.join(format!("report_{}.csv", report_id.value()))
}

/// Write the report rows as a CSV artifact, creating the directory if
/// needed. Columns follow the `ReportRow` field order.
pub fn write_report_csv(
    rows: &[ReportRow],
    report_dir: &Path,
    report_id: &ReportId,
) -> Result<PathBuf, csv::Error> {
    std::fs::create_dir_all(report_dir)?;
    let path = report_file_path(report_dir, report_id);
    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}

/// Generate a report end to end as a background job.
///
/// This function is designed to be spawned as a task. It logs progress to
/// the job tracker, writes the CSV artifact, and records the terminal state
/// both on the tracker (rich status) and through the report-state
/// repository (the two-valued external contract). Failures anywhere in the
/// pipeline are absorbed into the failed-job path.
pub async fn generate_report_job(
    job_id: String,
    tracker: JobTracker,
    repo: Arc<dyn FullRepository>,
    report_id: ReportId,
    report_dir: PathBuf,
    batch_size: usize,
) -> Result<PathBuf, String> {
    match run_report(&job_id, &tracker, &repo, &report_id, &report_dir, batch_size).await {
        Ok((path, store_count)) => {
            persist_report_state(repo.as_ref(), &report_id, true).await;
            tracker.log(
                &job_id,
                LogLevel::Success,
                format!("✅ Report {} complete", report_id),
            );
            let result = serde_json::json!({
                "report_id": report_id.value(),
                "csv_file": path.display().to_string(),
                "store_count": store_count,
            });
            tracker.complete_job(&job_id, Some(result));
            Ok(path)
        }
        Err(message) => {
            persist_report_state(repo.as_ref(), &report_id, false).await;
            tracker.fail_job(&job_id, &message);
            Err(message)
        }
    }
}

async fn run_report(
    job_id: &str,
    tracker: &JobTracker,
    repo: &Arc<dyn FullRepository>,
    report_id: &ReportId,
    report_dir: &Path,
    batch_size: usize,
) -> Result<(PathBuf, usize), String> {
    tracker.log(job_id, LogLevel::Info, "Loading observation snapshot...");
    let dataset = ReportDataset::load(repo.as_ref())
        .await
        .map_err(|e| format!("Failed to load report dataset: {}", e))?;
    tracker.log(
        job_id,
        LogLevel::Success,
        format!(
            "✓ Snapshot loaded: {} stores, reference instant {}",
            dataset.store_count(),
            dataset.generated_at()
        ),
    );

    let dataset = Arc::new(dataset);
    let rows = compute_report_rows(Arc::clone(&dataset), batch_size).await?;
    tracker.log(
        job_id,
        LogLevel::Success,
        format!("✓ Computed uptime for {} stores", rows.len()),
    );

    let store_count = rows.len();
    let report_dir = report_dir.to_path_buf();
    let report_id_owned = report_id.clone();
    let path = tokio::task::spawn_blocking(move || {
        write_report_csv(&rows, &report_dir, &report_id_owned)
    })
    .await
    .map_err(|e| format!("Report writer task failed: {}", e))?
    .map_err(|e| format!("Failed to write report artifact: {}", e))?;

    tracker.log(
        job_id,
        LogLevel::Success,
        format!("✓ Report written to {}", path.display()),
    );
    Ok((path, store_count))
}

/// Write the external two-valued report state; failures are logged and
/// swallowed, there is no higher layer to escalate to.
async fn persist_report_state(repo: &dyn FullRepository, report_id: &ReportId, complete: bool) {
    if let Err(e) = repo.set_report_complete(report_id, complete).await {
        warn!(report_id = %report_id, error = %e, "failed to persist report state");
    }
}
