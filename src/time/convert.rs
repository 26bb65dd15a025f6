//! Millisecond timestamps, calendar fields and date formatting.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::error::domain::TimeError;

/// Format used for absolute dates.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current time as milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Converts milliseconds since the epoch into a date in `tz`.
///
/// # Errors
///
/// Returns `TimeError::OutOfRange` when chrono cannot represent the instant.
pub fn timestamp_in<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Result<DateTime<Tz>, TimeError> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(tz))
        .ok_or(TimeError::OutOfRange { timestamp_ms })
}

/// Converts milliseconds since the epoch into a local date.
///
/// # Errors
///
/// Returns `TimeError::OutOfRange` when chrono cannot represent the instant.
pub fn timestamp_to_datetime(timestamp_ms: i64) -> Result<DateTime<Local>, TimeError> {
    timestamp_in(timestamp_ms, &Local)
}

/// Milliseconds since the epoch for `date`.
pub fn datetime_to_timestamp<Tz: TimeZone>(date: &DateTime<Tz>) -> i64 {
    date.timestamp_millis()
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS` in `tz`.
///
/// # Errors
///
/// Returns `TimeError::OutOfRange` when chrono cannot represent the instant.
pub fn format_timestamp_in<Tz>(timestamp_ms: i64, tz: &Tz) -> Result<String, TimeError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Ok(timestamp_in(timestamp_ms, tz)?
        .format(DATE_TIME_FORMAT)
        .to_string())
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// # Errors
///
/// Returns `TimeError::OutOfRange` when chrono cannot represent the instant.
pub fn format_timestamp(timestamp_ms: i64) -> Result<String, TimeError> {
    format_timestamp_in(timestamp_ms, &Local)
}

/// `first - second` in milliseconds.
pub fn timestamp_delta<Tz1: TimeZone, Tz2: TimeZone>(
    first: &DateTime<Tz1>,
    second: &DateTime<Tz2>,
) -> i64 {
    first.timestamp_millis() - second.timestamp_millis()
}

/// Calendar year.
pub fn year<D: Datelike>(date: &D) -> i32 {
    date.year()
}

/// Month of the year, 1 to 12.
pub fn month<D: Datelike>(date: &D) -> u32 {
    date.month()
}

/// Day of the week, 1 (Sunday) to 7 (Saturday).
pub fn day_of_week<D: Datelike>(date: &D) -> u32 {
    date.weekday().number_from_sunday()
}

/// Day of the month, starting at 1.
pub fn day_of_month<D: Datelike>(date: &D) -> u32 {
    date.day()
}

/// Day of the year, starting at 1.
pub fn day_of_year<D: Datelike>(date: &D) -> u32 {
    date.ordinal()
}
