//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::sse::{Event, Sse},
    response::IntoResponse,
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    HealthResponse, IngestRequest, IngestResponse, JobStatusResponse, ReportStatusResponse,
    TriggerReportResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::ReportId;
use crate::db::{FullRepository, ReportStateRepository};
use crate::ingest;
use crate::services::job_tracker::JobStatus;
use crate::services::report;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Dataset Ingestion
// =============================================================================

/// POST /v1/datasets
///
/// Trigger a background dataset load from CSV files. Returns a job ID for
/// tracking progress.
pub async fn ingest_dataset(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    let data_dir = request
        .data_dir
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| state.config.ingest.data_dir.clone());

    let job_id = state.job_tracker.create_job();
    let response_job_id = job_id.clone();

    let tracker = state.job_tracker.clone();
    let repo = state.repository.clone();
    tokio::spawn(async move {
        let _ = ingest::run_ingest_job(job_id, tracker, repo, data_dir).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(IngestResponse {
            job_id: response_job_id.clone(),
            message: format!(
                "Dataset load started. Track progress at /v1/jobs/{}/logs",
                response_job_id
            ),
        }),
    ))
}

// =============================================================================
// Reports
// =============================================================================

/// POST /v1/reports
///
/// Trigger report generation asynchronously. Registers the report id as
/// pending, spawns the background job, and returns both ids.
pub async fn trigger_report(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<TriggerReportResponse>), AppError> {
    let report_id = ReportId::generate();

    // Register the pending state before the job can race to a terminal one.
    state
        .repository
        .set_report_complete(&report_id, false)
        .await?;

    let job_id = state.job_tracker.create_job();
    let response_job_id = job_id.clone();

    let tracker = state.job_tracker.clone();
    let repo = state.repository.clone();
    let report_dir = state.config.report.report_dir.clone();
    let batch_size = state.config.report.batch_size;
    let spawned_report_id = report_id.clone();
    tokio::spawn(async move {
        let _ = report::generate_report_job(
            job_id,
            tracker,
            repo,
            spawned_report_id,
            report_dir,
            batch_size,
        )
        .await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(TriggerReportResponse {
            report_id: report_id.value().to_string(),
            job_id: response_job_id,
            message: format!(
                "Report generation started. Use /v1/reports/{} to check status.",
                report_id
            ),
        }),
    ))
}

/// GET /v1/reports/{report_id}
///
/// Get report status and artifact details. Unknown report ids are 404; a
/// known id reports "Complete" with artifact metadata once the CSV exists,
/// otherwise "Running".
pub async fn get_report_status(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> HandlerResult<ReportStatusResponse> {
    let report_id = ReportId::new(report_id);

    if state
        .repository
        .is_report_complete(&report_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Report {} not found",
            report_id
        )));
    }

    let path = report::report_file_path(&state.config.report.report_dir, &report_id);
    if path.exists() {
        let file_size_bytes = tokio::fs::metadata(&path).await.map(|m| m.len()).ok();
        let store_count = tokio::fs::read_to_string(&path)
            .await
            .ok()
            .map(|content| content.lines().count().saturating_sub(1));

        Ok(Json(ReportStatusResponse {
            status: "Complete".to_string(),
            report_id: report_id.value().to_string(),
            csv_file: Some(path.display().to_string()),
            file_size_bytes,
            store_count,
            download_url: Some(format!("/v1/reports/{}/download", report_id)),
            message: None,
        }))
    } else {
        Ok(Json(ReportStatusResponse {
            status: "Running".to_string(),
            report_id: report_id.value().to_string(),
            csv_file: None,
            file_size_bytes: None,
            store_count: None,
            download_url: None,
            message: Some(
                "Report is still being generated. Please check again in a few moments."
                    .to_string(),
            ),
        }))
    }
}

/// GET /v1/reports/{report_id}/download
///
/// Download the report CSV artifact.
pub async fn download_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report_id = ReportId::new(report_id);
    let path = report::report_file_path(&state.config.report.report_dir, &report_id);

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("Report {} artifact not found", report_id)))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"report_{}.csv\"", report_id),
        ),
    ];
    Ok((headers, bytes))
}

// =============================================================================
// Async Job Management
// =============================================================================

/// GET /v1/jobs/{job_id}
///
/// Get the current status and logs of a background job.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        job_id: job.job_id,
        status: format!("{:?}", job.status).to_lowercase(),
        logs: job.logs,
        result: job.result,
        error: job.error,
    }))
}

/// GET /v1/jobs/{job_id}/logs
///
/// Stream job logs via Server-Sent Events (SSE).
pub async fn stream_job_logs(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    // Verify job exists
    if state.job_tracker.get_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", job_id)));
    }

    let tracker = state.job_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            // Send new logs since last check
            let logs = tracker.get_logs(&job_id);
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            // Check if job is complete
            if let Some(job) = tracker.get_job(&job_id) {
                if job.status != JobStatus::Running {
                    // Serde serialization keeps status values lowercase
                    // ("completed", "failed") for consumers.
                    let final_event = serde_json::json!({
                        "status": job.status,
                        "result": job.result,
                        "error": job.error,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            // Wait before checking again
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
