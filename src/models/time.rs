//! Timestamp and wall-clock parsing helpers.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};

/// Accepted layouts for naive timestamps after any trailing ` UTC` marker
/// has been stripped. `%.f` tolerates an optional fractional-seconds part.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a raw timestamp string into a naive UTC instant.
///
/// Offset-carrying inputs (RFC 3339 or `%z` suffixed) are converted to UTC
/// before the offset is dropped; naive inputs are assumed to already be UTC.
/// Returns `None` when no accepted layout matches.
pub fn parse_timestamp_utc(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    let naive = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt);
        }
    }

    None
}

/// Parse a local wall-clock `HH:MM:SS` string.
pub fn parse_local_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S").ok()
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
