//! # Storewatch Backend
//!
//! Store uptime/downtime reporting engine.
//!
//! This crate ingests sparse, irregularly-timed boolean status polls for a
//! fleet of monitored stores and extrapolates, per store, how many minutes
//! (or hours) each store was up versus down over three trailing windows:
//! the last hour, the last day, and the last week. Results are assembled
//! into a CSV report artifact by an asynchronous background job and served
//! over a REST API via Axum.
//!
//! ## Features
//!
//! - **Ingestion**: Bulk CSV loading with column-name normalization
//! - **Extrapolation**: Calendar-aware uptime estimation from sparse polls
//! - **Business Hours**: Weekly calendars with overnight spans, or 24/7
//! - **Reporting**: Batched, data-parallel report generation per store
//! - **Job Tracking**: Background jobs with progress logs and SSE streaming
//! - **HTTP API**: RESTful endpoints for triggering and polling reports
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and public DTO re-exports
//! - [`config`]: TOML service configuration with standard search paths
//! - [`db`]: Repository pattern and the in-memory persistence layer
//! - [`ingest`]: CSV dataset loading and normalization
//! - [`services`]: Business logic — calendars, extrapolation, report jobs
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod db;
pub mod ingest;
pub mod models;
pub mod services;

pub mod http;
