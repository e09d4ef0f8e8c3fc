//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::db::repository::FullRepository;
use crate::services::job_tracker::JobTracker;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Tracker for background ingest/report jobs
    pub job_tracker: JobTracker,
    /// Service configuration (data/report directories, batch size)
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Create a new application state with the given repository and config.
    pub fn new(repository: Arc<dyn FullRepository>, config: ServiceConfig) -> Self {
        Self {
            repository,
            job_tracker: JobTracker::new(),
            config: Arc::new(config),
        }
    }
}
