use super::{parse_local_time, parse_timestamp_utc};
use chrono::{NaiveDate, Timelike};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

#[test]
fn test_parse_naive_with_utc_suffix() {
    let dt = parse_timestamp_utc("2023-01-24 09:06:42.605777 UTC").unwrap();
    assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 1, 24).unwrap());
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (9, 6, 42));
}

#[test]
fn test_parse_naive_without_fraction() {
    let dt = parse_timestamp_utc("2023-01-24 09:06:42").unwrap();
    assert_eq!(dt, utc(2023, 1, 24, 9, 6, 42));
}

#[test]
fn test_parse_t_separator() {
    let dt = parse_timestamp_utc("2023-01-24T09:06:42").unwrap();
    assert_eq!(dt, utc(2023, 1, 24, 9, 6, 42));
}

#[test]
fn test_parse_rfc3339_offset_converted_to_utc() {
    let dt = parse_timestamp_utc("2023-01-24T09:06:42+02:00").unwrap();
    assert_eq!(dt, utc(2023, 1, 24, 7, 6, 42));
}

#[test]
fn test_parse_space_separated_offset_converted_to_utc() {
    let dt = parse_timestamp_utc("2023-01-24 09:06:42-05:00").unwrap();
    assert_eq!(dt, utc(2023, 1, 24, 14, 6, 42));
}

#[test]
fn test_parse_surrounding_whitespace() {
    let dt = parse_timestamp_utc("  2023-01-24 09:06:42 UTC  ").unwrap();
    assert_eq!(dt, utc(2023, 1, 24, 9, 6, 42));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(parse_timestamp_utc("not a timestamp").is_none());
    assert!(parse_timestamp_utc("").is_none());
    assert!(parse_timestamp_utc("2023-13-40 99:99:99").is_none());
}

#[test]
fn test_parse_local_time_basic() {
    let t = parse_local_time("09:30:00").unwrap();
    assert_eq!((t.hour(), t.minute(), t.second()), (9, 30, 0));
}

#[test]
fn test_parse_local_time_midnight() {
    let t = parse_local_time("00:00:00").unwrap();
    assert_eq!((t.hour(), t.minute()), (0, 0));
}

#[test]
fn test_parse_local_time_rejects_short_form() {
    assert!(parse_local_time("09:30").is_none());
    assert!(parse_local_time("25:00:00").is_none());
    assert!(parse_local_time("").is_none());
}
