//! Uptime/downtime projection and the per-store report builder.
//!
//! Converts a window's uptime ratio into concrete uptime/downtime figures
//! against the store's capacity model, and assembles the three trailing
//! windows into one report row. Pure functions throughout: no I/O, no
//! shared state, safe to run concurrently for distinct stores.

use chrono::{Duration, NaiveDateTime};

use crate::api::StoreId;
use crate::models::{Observation, ReportRow};
use crate::services::calendar::CalendarProfile;
use crate::services::extrapolation::{last_before, observations_in_window, uptime_ratio};

/// One of the three trailing report windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    Hour,
    Day,
    Week,
}

impl ReportWindow {
    /// Length of the window.
    pub fn span(&self) -> Duration {
        match self {
            ReportWindow::Hour => Duration::hours(1),
            ReportWindow::Day => Duration::days(1),
            ReportWindow::Week => Duration::weeks(1),
        }
    }

    /// Capacity of the window for a 24/7 store, in the window's own unit:
    /// minutes for the hour window, hours for day and week.
    pub fn open_capacity(&self) -> f64 {
        match self {
            ReportWindow::Hour => 60.0,
            ReportWindow::Day => 24.0,
            ReportWindow::Week => 168.0,
        }
    }

    /// Capacity of the window under the store's calendar profile.
    ///
    /// Calendar-bound stores scale by the average daily open hours; the
    /// hour window is capped at its own 60 minutes.
    pub fn capacity(&self, profile: &CalendarProfile) -> f64 {
        if profile.always_open {
            return self.open_capacity();
        }
        match self {
            ReportWindow::Hour => (profile.average_daily_hours * 60.0).min(60.0),
            ReportWindow::Day => profile.average_daily_hours,
            ReportWindow::Week => profile.average_daily_hours * 7.0,
        }
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Project an uptime ratio onto a window capacity.
///
/// Returns `(uptime, downtime)`, both floored at zero and rounded to 2
/// decimals; they sum to the capacity up to that rounding.
pub fn project(ratio: f64, capacity: f64) -> (f64, f64) {
    let uptime = ratio * capacity;
    let downtime = capacity - uptime;
    (round2(uptime.max(0.0)), round2(downtime.max(0.0)))
}

/// The fixed row reported for a store with no observations ever: fully down
/// across all three windows at 24/7 capacity, regardless of any calendar.
pub fn fully_down_row(store_id: StoreId) -> ReportRow {
    ReportRow {
        store_id,
        uptime_last_hour: 0.0,
        uptime_last_day: 0.0,
        uptime_last_week: 0.0,
        downtime_last_hour: 60.0,
        downtime_last_day: 24.0,
        downtime_last_week: 168.0,
    }
}

/// Estimated uptime ratio for one trailing window ending at `now`.
fn window_ratio(observations: &[Observation], window: ReportWindow, now: NaiveDateTime) -> f64 {
    let start = now - window.span();
    let in_window = observations_in_window(observations, start, now);
    uptime_ratio(in_window, last_before(observations, start))
}

/// Build the report row for one store.
///
/// `observations` must be sorted ascending by timestamp; `now` is the
/// shared reference instant computed once by the orchestrator. A store with
/// no observations short-circuits to the fixed fully-down row before any
/// per-window logic runs.
pub fn compute_store_report(
    store_id: &StoreId,
    observations: &[Observation],
    profile: &CalendarProfile,
    now: NaiveDateTime,
) -> ReportRow {
    if observations.is_empty() {
        return fully_down_row(store_id.clone());
    }

    let hour_ratio = window_ratio(observations, ReportWindow::Hour, now);
    let day_ratio = window_ratio(observations, ReportWindow::Day, now);
    let week_ratio = window_ratio(observations, ReportWindow::Week, now);

    let (uptime_last_hour, downtime_last_hour) =
        project(hour_ratio, ReportWindow::Hour.capacity(profile));
    let (uptime_last_day, downtime_last_day) =
        project(day_ratio, ReportWindow::Day.capacity(profile));
    let (uptime_last_week, downtime_last_week) =
        project(week_ratio, ReportWindow::Week.capacity(profile));

    ReportRow {
        store_id: store_id.clone(),
        uptime_last_hour,
        uptime_last_day,
        uptime_last_week,
        downtime_last_hour,
        downtime_last_day,
        downtime_last_week,
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_store_report, fully_down_row, project, round2, ReportWindow};
    use crate::api::StoreId;
    use crate::models::Observation;
    use crate::services::calendar::CalendarProfile;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 25)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn open_profile() -> CalendarProfile {
        CalendarProfile {
            always_open: true,
            average_daily_hours: 24.0,
            timezone: "America/Chicago".to_string(),
        }
    }

    fn bounded_profile(average_daily_hours: f64) -> CalendarProfile {
        CalendarProfile {
            always_open: false,
            average_daily_hours,
            timezone: "America/Chicago".to_string(),
        }
    }

    fn obs(minutes_before: i64, status: bool) -> Observation {
        Observation::new(
            "store-1",
            reference() - Duration::minutes(minutes_before),
            status,
        )
    }

    #[test]
    fn test_open_capacities() {
        let profile = open_profile();
        assert_eq!(ReportWindow::Hour.capacity(&profile), 60.0);
        assert_eq!(ReportWindow::Day.capacity(&profile), 24.0);
        assert_eq!(ReportWindow::Week.capacity(&profile), 168.0);
    }

    #[test]
    fn test_bounded_capacities() {
        let profile = bounded_profile(8.0);
        assert_eq!(ReportWindow::Hour.capacity(&profile), 60.0);
        assert_eq!(ReportWindow::Day.capacity(&profile), 8.0);
        assert_eq!(ReportWindow::Week.capacity(&profile), 56.0);
    }

    #[test]
    fn test_short_day_caps_hour_window() {
        // 30 open minutes a day caps the hour window below 60
        let profile = bounded_profile(0.5);
        assert_eq!(ReportWindow::Hour.capacity(&profile), 30.0);
    }

    #[test]
    fn test_project_sums_to_capacity() {
        let (up, down) = project(0.3, 8.0);
        assert!((up + down - 8.0).abs() < 0.01);
        assert!(up >= 0.0 && down >= 0.0);
    }

    #[test]
    fn test_project_rounds_to_two_decimals() {
        let (up, down) = project(1.0 / 3.0, 60.0);
        assert_eq!(up, 20.0);
        assert_eq!(down, 40.0);

        let (up, _) = project(1.0 / 7.0, 24.0);
        assert_eq!(up, 3.43);
    }

    #[test]
    fn test_fully_down_row_values() {
        let row = fully_down_row(StoreId::new("store-1"));
        assert_eq!(row.uptime_last_hour, 0.0);
        assert_eq!(row.uptime_last_day, 0.0);
        assert_eq!(row.uptime_last_week, 0.0);
        assert_eq!(row.downtime_last_hour, 60.0);
        assert_eq!(row.downtime_last_day, 24.0);
        assert_eq!(row.downtime_last_week, 168.0);
    }

    #[test]
    fn test_no_observations_ignores_calendar() {
        // The special case wins even for a calendar-bound store: the row is
        // the fixed 60/24/168, not scaled to 8 open hours.
        let row = compute_store_report(
            &StoreId::new("store-1"),
            &[],
            &bounded_profile(8.0),
            reference(),
        );
        assert_eq!(row, fully_down_row(StoreId::new("store-1")));
    }

    #[test]
    fn test_mixed_samples_across_windows() {
        // One up sample 30 minutes ago, one down sample 90 minutes ago.
        // Hour window sees only the up sample; day and week see both.
        let observations = vec![obs(90, false), obs(30, true)];
        let row = compute_store_report(
            &StoreId::new("store-1"),
            &observations,
            &open_profile(),
            reference(),
        );

        assert_eq!(row.uptime_last_hour, 60.0);
        assert_eq!(row.downtime_last_hour, 0.0);
        assert_eq!(row.uptime_last_day, 12.0);
        assert_eq!(row.downtime_last_day, 12.0);
        assert_eq!(row.uptime_last_week, 84.0);
        assert_eq!(row.downtime_last_week, 84.0);
    }

    #[test]
    fn test_hold_last_value_fills_empty_window() {
        // Only sample is an up poll from two hours ago: the hour window is
        // empty and extrapolates to fully up.
        let observations = vec![obs(120, true)];
        let row = compute_store_report(
            &StoreId::new("store-1"),
            &observations,
            &open_profile(),
            reference(),
        );
        assert_eq!(row.uptime_last_hour, 60.0);
        assert_eq!(row.downtime_last_hour, 0.0);
    }

    #[test]
    fn test_calendar_bound_projection() {
        // Fully up, 8 open hours a day.
        let observations = vec![obs(30, true)];
        let row = compute_store_report(
            &StoreId::new("store-1"),
            &observations,
            &bounded_profile(8.0),
            reference(),
        );
        assert_eq!(row.uptime_last_hour, 60.0);
        assert_eq!(row.uptime_last_day, 8.0);
        assert_eq!(row.downtime_last_day, 0.0);
        assert_eq!(row.uptime_last_week, 56.0);
    }

    #[test]
    fn test_uptime_downtime_sum_to_capacity_per_window() {
        let observations = vec![obs(5000, true), obs(700, false), obs(30, true)];
        let profile = bounded_profile(10.5);
        let row = compute_store_report(
            &StoreId::new("store-1"),
            &observations,
            &profile,
            reference(),
        );

        assert!((row.uptime_last_hour + row.downtime_last_hour - 60.0).abs() < 0.01);
        assert!((row.uptime_last_day + row.downtime_last_day - 10.5).abs() < 0.01);
        assert!((row.uptime_last_week + row.downtime_last_week - 73.5).abs() < 0.01);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005), 1.0); // floating-point representation of 1.005
        assert_eq!(round2(2.675000001), 2.68);
        assert_eq!(round2(0.0), 0.0);
    }
}
