//! Report job lifecycle tests: artifact writing, terminal states, and the
//! failure path.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use storewatch::api::{ReportId, StoreId};
use storewatch::db::{
    CalendarRepository, FullRepository, LocalRepository, ReportStateRepository, RepositoryError,
    RepositoryResult, StatusRepository,
};
use storewatch::models::{BusinessHoursEntry, Observation, TimezoneEntry};
use storewatch::services::job_tracker::{JobStatus, JobTracker};
use storewatch::services::report::{generate_report_job, report_file_path};

fn ts(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_report_job_writes_artifact_and_completes() {
    let repo: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());
    repo.insert_observations(vec![
        Observation::new("s1", ts(25, 11), true),
        Observation::new("s2", ts(25, 12), false),
    ])
    .await
    .unwrap();

    let report_dir = tempfile::tempdir().unwrap();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();
    let report_id = ReportId::new("job-test");
    repo.set_report_complete(&report_id, false).await.unwrap();

    let path = generate_report_job(
        job_id.clone(),
        tracker.clone(),
        Arc::clone(&repo),
        report_id.clone(),
        report_dir.path().to_path_buf(),
        100,
    )
    .await
    .unwrap();

    assert_eq!(path, report_file_path(report_dir.path(), &report_id));
    assert!(path.exists());

    // External two-valued state flipped to complete.
    assert_eq!(repo.is_report_complete(&report_id).await.unwrap(), Some(true));

    // Internal tracker state is the richer tagged status.
    let job = tracker.get_job(&job_id).unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.error.is_none());
    assert!(job.result.is_some());

    // Artifact has the exact column header and one row per store.
    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "store_id,uptime_last_hour,uptime_last_day,uptime_last_week,\
         downtime_last_hour,downtime_last_day,downtime_last_week"
    );
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn test_report_job_empty_dataset_writes_header_only_artifact() {
    let repo: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());
    let report_dir = tempfile::tempdir().unwrap();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();
    let report_id = ReportId::new("empty");

    let path = generate_report_job(
        job_id,
        tracker,
        Arc::clone(&repo),
        report_id.clone(),
        report_dir.path().to_path_buf(),
        100,
    )
    .await
    .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert_eq!(repo.is_report_complete(&report_id).await.unwrap(), Some(true));
}

/// Repository whose reads always fail, to drive the job failure path.
struct FailingRepository;

fn unreachable_store() -> RepositoryError {
    RepositoryError::connection("storage unreachable")
}

#[async_trait]
impl StatusRepository for FailingRepository {
    async fn insert_observations(&self, _rows: Vec<Observation>) -> RepositoryResult<usize> {
        Err(unreachable_store())
    }

    async fn observations_for_store(
        &self,
        _store_id: &StoreId,
    ) -> RepositoryResult<Vec<Observation>> {
        Err(unreachable_store())
    }

    async fn observation_store_ids(&self) -> RepositoryResult<Vec<StoreId>> {
        Err(unreachable_store())
    }

    async fn latest_observation_at(&self) -> RepositoryResult<Option<NaiveDateTime>> {
        Err(unreachable_store())
    }
}

#[async_trait]
impl CalendarRepository for FailingRepository {
    async fn insert_business_hours(
        &self,
        _rows: Vec<BusinessHoursEntry>,
    ) -> RepositoryResult<usize> {
        Err(unreachable_store())
    }

    async fn insert_timezones(&self, _rows: Vec<TimezoneEntry>) -> RepositoryResult<usize> {
        Err(unreachable_store())
    }

    async fn all_business_hours(&self) -> RepositoryResult<Vec<BusinessHoursEntry>> {
        Err(unreachable_store())
    }

    async fn all_timezones(&self) -> RepositoryResult<Vec<TimezoneEntry>> {
        Err(unreachable_store())
    }

    async fn business_hours_for_store(
        &self,
        _store_id: &StoreId,
    ) -> RepositoryResult<Vec<BusinessHoursEntry>> {
        Err(unreachable_store())
    }

    async fn calendar_store_ids(&self) -> RepositoryResult<Vec<StoreId>> {
        Err(unreachable_store())
    }
}

#[async_trait]
impl ReportStateRepository for FailingRepository {
    async fn set_report_complete(
        &self,
        _report_id: &ReportId,
        _complete: bool,
    ) -> RepositoryResult<()> {
        // The job swallows state-write failures; failing here too proves it.
        Err(unreachable_store())
    }

    async fn is_report_complete(&self, _report_id: &ReportId) -> RepositoryResult<Option<bool>> {
        Err(unreachable_store())
    }
}

#[async_trait]
impl FullRepository for FailingRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_report_job_failure_marks_job_failed() {
    let repo: Arc<dyn FullRepository> = Arc::new(FailingRepository);
    let report_dir = tempfile::tempdir().unwrap();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();
    let report_id = ReportId::new("doomed");

    let result = generate_report_job(
        job_id.clone(),
        tracker.clone(),
        repo,
        report_id.clone(),
        report_dir.path().to_path_buf(),
        100,
    )
    .await;

    assert!(result.is_err());

    let job = tracker.get_job(&job_id).unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    let reason = job.error.unwrap();
    assert!(reason.contains("Failed to load report dataset"));

    // No artifact was produced.
    assert!(!report_file_path(report_dir.path(), &report_id).exists());
}
