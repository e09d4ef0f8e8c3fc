//! Axum-based HTTP server.
//!
//! Exposes report triggering/polling/download, dataset ingestion, and
//! background-job inspection. Handlers stay thin and delegate to the
//! service layer.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
