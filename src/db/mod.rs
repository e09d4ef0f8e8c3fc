//! Database module for observation and calendar storage.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! The module follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, report jobs)              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! │  - StatusRepository: observation inserts and queries    │
//! │  - CalendarRepository: business hours and timezones     │
//! │  - ReportStateRepository: persisted job outcomes        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The reporting core only ever sees an immutable snapshot loaded through
//! these traits; it never assumes a chunk size or a storage engine.

pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{
    CalendarRepository, ErrorContext, FullRepository, ReportStateRepository, RepositoryError,
    RepositoryResult, StatusRepository,
};
