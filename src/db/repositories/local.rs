//! In-memory repository implementation.
//!
//! Backs the service in tests and local development. Observations are kept
//! in a per-store `BTreeMap` keyed by timestamp, which gives both the
//! sorted-ascending query contract and last-write-wins deduplication for
//! free.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;

use crate::api::{ReportId, StoreId};
use crate::db::repository::{
    CalendarRepository, FullRepository, ReportStateRepository, RepositoryResult, StatusRepository,
};
use crate::models::{BusinessHoursEntry, Observation, TimezoneEntry};

#[derive(Default)]
struct LocalState {
    /// Store ids with observations, in first-seen order.
    observation_order: Vec<StoreId>,
    observations: HashMap<StoreId, BTreeMap<NaiveDateTime, bool>>,
    /// Store ids appearing in calendar/timezone data, in first-seen order.
    calendar_order: Vec<StoreId>,
    business_hours: HashMap<StoreId, Vec<BusinessHoursEntry>>,
    timezones: HashMap<StoreId, String>,
    report_states: HashMap<ReportId, bool>,
}

impl LocalState {
    fn note_calendar_store(&mut self, store_id: &StoreId) {
        if !self.calendar_order.contains(store_id) {
            self.calendar_order.push(store_id.clone());
        }
    }
}

/// In-memory repository.
pub struct LocalRepository {
    state: RwLock<LocalState>,
}

impl LocalRepository {
    /// Create a new, empty repository.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LocalState::default()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusRepository for LocalRepository {
    async fn insert_observations(&self, rows: Vec<Observation>) -> RepositoryResult<usize> {
        let mut state = self.state.write();
        let accepted = rows.len();
        for row in rows {
            if !state.observations.contains_key(&row.store_id) {
                state.observation_order.push(row.store_id.clone());
            }
            state
                .observations
                .entry(row.store_id)
                .or_default()
                .insert(row.timestamp_utc, row.status);
        }
        Ok(accepted)
    }

    async fn observations_for_store(
        &self,
        store_id: &StoreId,
    ) -> RepositoryResult<Vec<Observation>> {
        let state = self.state.read();
        let rows = state
            .observations
            .get(store_id)
            .map(|series| {
                series
                    .iter()
                    .map(|(timestamp_utc, status)| Observation {
                        store_id: store_id.clone(),
                        timestamp_utc: *timestamp_utc,
                        status: *status,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn observation_store_ids(&self) -> RepositoryResult<Vec<StoreId>> {
        Ok(self.state.read().observation_order.clone())
    }

    async fn latest_observation_at(&self) -> RepositoryResult<Option<NaiveDateTime>> {
        let state = self.state.read();
        let latest = state
            .observations
            .values()
            .filter_map(|series| series.last_key_value().map(|(ts, _)| *ts))
            .max();
        Ok(latest)
    }
}

#[async_trait]
impl CalendarRepository for LocalRepository {
    async fn insert_business_hours(
        &self,
        rows: Vec<BusinessHoursEntry>,
    ) -> RepositoryResult<usize> {
        let mut state = self.state.write();
        let accepted = rows.len();
        for row in rows {
            state.note_calendar_store(&row.store_id);
            state
                .business_hours
                .entry(row.store_id.clone())
                .or_default()
                .push(row);
        }
        Ok(accepted)
    }

    async fn insert_timezones(&self, rows: Vec<TimezoneEntry>) -> RepositoryResult<usize> {
        let mut state = self.state.write();
        let accepted = rows.len();
        for row in rows {
            state.note_calendar_store(&row.store_id);
            state.timezones.insert(row.store_id, row.timezone_str);
        }
        Ok(accepted)
    }

    async fn all_business_hours(&self) -> RepositoryResult<Vec<BusinessHoursEntry>> {
        let state = self.state.read();
        let mut rows = Vec::new();
        for store_id in &state.calendar_order {
            if let Some(entries) = state.business_hours.get(store_id) {
                rows.extend(entries.iter().cloned());
            }
        }
        Ok(rows)
    }

    async fn all_timezones(&self) -> RepositoryResult<Vec<TimezoneEntry>> {
        let state = self.state.read();
        let mut rows = Vec::new();
        for store_id in &state.calendar_order {
            if let Some(timezone_str) = state.timezones.get(store_id) {
                rows.push(TimezoneEntry {
                    store_id: store_id.clone(),
                    timezone_str: timezone_str.clone(),
                });
            }
        }
        Ok(rows)
    }

    async fn business_hours_for_store(
        &self,
        store_id: &StoreId,
    ) -> RepositoryResult<Vec<BusinessHoursEntry>> {
        let state = self.state.read();
        Ok(state
            .business_hours
            .get(store_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn calendar_store_ids(&self) -> RepositoryResult<Vec<StoreId>> {
        Ok(self.state.read().calendar_order.clone())
    }
}

#[async_trait]
impl ReportStateRepository for LocalRepository {
    async fn set_report_complete(
        &self,
        report_id: &ReportId,
        complete: bool,
    ) -> RepositoryResult<()> {
        // Single insert under the write lock: the atomic terminal-state write.
        self.state
            .write()
            .report_states
            .insert(report_id.clone(), complete);
        Ok(())
    }

    async fn is_report_complete(&self, report_id: &ReportId) -> RepositoryResult<Option<bool>> {
        Ok(self.state.read().report_states.get(report_id).copied())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
