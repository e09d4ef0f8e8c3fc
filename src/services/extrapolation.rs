//! Window extraction and uptime-ratio estimation over sparse polls.
//!
//! Both functions expect the store's observation slice to already be sorted
//! ascending by timestamp (the repository contract); extraction is a pure
//! range query over that slice.

use chrono::NaiveDateTime;

use crate::models::Observation;

/// The subsequence of observations falling inside `[start, end]`, inclusive
/// on both edges.
pub fn observations_in_window(
    observations: &[Observation],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> &[Observation] {
    let lo = observations.partition_point(|obs| obs.timestamp_utc < start);
    let hi = observations.partition_point(|obs| obs.timestamp_utc <= end);
    &observations[lo..hi.max(lo)]
}

/// The most recent observation strictly before `start`, if any.
pub fn last_before(observations: &[Observation], start: NaiveDateTime) -> Option<&Observation> {
    let lo = observations.partition_point(|obs| obs.timestamp_utc < start);
    observations[..lo].last()
}

/// Estimate the uptime ratio for one window.
///
/// With in-window samples the ratio is the fraction reporting up. An empty
/// window extrapolates from the last observation before it (hold-last-value:
/// 1.0 if it was up, 0.0 if down). With no evidence at all the store is
/// assumed down.
pub fn uptime_ratio(in_window: &[Observation], last_known: Option<&Observation>) -> f64 {
    if !in_window.is_empty() {
        let active = in_window.iter().filter(|obs| obs.status).count();
        return active as f64 / in_window.len() as f64;
    }

    match last_known {
        Some(observation) if observation.status => 1.0,
        Some(_) => 0.0,
        None => 0.0,
    }
}
