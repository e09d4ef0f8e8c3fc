//! Business-hours calendar resolution.
//!
//! Collapses a store's weekly entries into a single profile: either "always
//! open" (no entries) or an average daily open duration in hours. The
//! average deliberately ignores which weekday falls inside a report window;
//! it is one scalar "typical day length" applied uniformly. The timezone
//! label is carried on the profile but not applied to the math.

use crate::models::time::parse_local_time;
use crate::models::BusinessHoursEntry;

/// Timezone assumed for stores with no assignment.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Daily hours substituted for an entry whose times cannot be parsed.
pub const FALLBACK_DAILY_HOURS: f64 = 12.0;

/// Resolved business-hours profile for one store.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarProfile {
    /// True when the store has no business-hours entries (24/7 operation).
    pub always_open: bool,
    /// Mean open hours per day; only meaningful when not always open.
    pub average_daily_hours: f64,
    /// Assigned timezone label (informational).
    pub timezone: String,
}

/// Resolve a store's calendar profile from its weekly entries and timezone
/// assignment.
pub fn resolve_calendar(entries: &[BusinessHoursEntry], timezone: Option<&str>) -> CalendarProfile {
    let timezone = timezone.unwrap_or(DEFAULT_TIMEZONE).to_string();

    if entries.is_empty() {
        return CalendarProfile {
            always_open: true,
            average_daily_hours: 24.0,
            timezone,
        };
    }

    let total: f64 = entries.iter().map(entry_daily_hours).sum();
    CalendarProfile {
        always_open: false,
        average_daily_hours: total / entries.len() as f64,
        timezone,
    }
}

/// Open duration in hours contributed by a single weekly entry.
///
/// Durations are computed from the hour and minute components only.
/// `end <= start` is an overnight span: `(24 − start) + end`. An
/// unparseable entry contributes the 12-hour fallback instead of failing
/// the store.
fn entry_daily_hours(entry: &BusinessHoursEntry) -> f64 {
    let (Some(start), Some(end)) = (
        parse_local_time(&entry.start_time_local),
        parse_local_time(&entry.end_time_local),
    ) else {
        return FALLBACK_DAILY_HOURS;
    };

    use chrono::Timelike;
    let start_hours = start.hour() as f64 + start.minute() as f64 / 60.0;
    let end_hours = end.hour() as f64 + end.minute() as f64 / 60.0;

    let hours = if end <= start {
        (24.0 - start_hours) + end_hours
    } else {
        end_hours - start_hours
    };
    hours.max(0.0)
}
