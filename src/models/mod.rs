//! Domain models for observations, business-hours calendars, and report rows.
//!
//! Observation timestamps are naive UTC: offsets are resolved at ingestion
//! and dropped before storage, so every comparison in the reporting math is
//! between naive UTC instants.

pub mod time;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::StoreId;

/// A single timestamped boolean status poll for one store.
///
/// Uniqueness key is `(store_id, timestamp_utc)`; a later ingested duplicate
/// overwrites the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub store_id: StoreId,
    pub timestamp_utc: NaiveDateTime,
    pub status: bool,
}

impl Observation {
    pub fn new(store_id: impl Into<StoreId>, timestamp_utc: NaiveDateTime, status: bool) -> Self {
        Self {
            store_id: store_id.into(),
            timestamp_utc,
            status,
        }
    }
}

/// One weekly recurring open interval for a store.
///
/// `start_time_local`/`end_time_local` are local wall-clock `HH:MM:SS`
/// strings kept raw; parsing is deferred to the calendar resolver so that a
/// single malformed entry degrades to a default instead of failing the
/// store. `end <= start` encodes a shift crossing midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursEntry {
    pub store_id: StoreId,
    /// Day of week, 0-6.
    pub day_of_week: u8,
    pub start_time_local: String,
    pub end_time_local: String,
}

impl BusinessHoursEntry {
    pub fn new(
        store_id: impl Into<StoreId>,
        day_of_week: u8,
        start_time_local: impl Into<String>,
        end_time_local: impl Into<String>,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            day_of_week,
            start_time_local: start_time_local.into(),
            end_time_local: end_time_local.into(),
        }
    }
}

/// Timezone assignment for a store.
///
/// Carried through the data model for completeness; the reporting math does
/// not currently localize business hours with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneEntry {
    pub store_id: StoreId,
    pub timezone_str: String,
}

impl TimezoneEntry {
    pub fn new(store_id: impl Into<StoreId>, timezone_str: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            timezone_str: timezone_str.into(),
        }
    }
}

/// One output row of the uptime report.
///
/// Units are intentionally mixed: the hour-window figures are minutes, the
/// day/week-window figures are hours. The serialized field order is the
/// report's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub store_id: StoreId,
    pub uptime_last_hour: f64,
    pub uptime_last_day: f64,
    pub uptime_last_week: f64,
    pub downtime_last_hour: f64,
    pub downtime_last_day: f64,
    pub downtime_last_week: f64,
}
