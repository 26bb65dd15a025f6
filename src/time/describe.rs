//! Relative "time ago" descriptions.

use std::fmt::Display;

use chrono::{Local, TimeZone};

use crate::time::convert::{format_timestamp_in, now_millis};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Describes how long ago `timestamp_ms` was, relative to now.
///
/// See [`describe_timestamp_at`].
#[must_use]
pub fn describe_timestamp(timestamp_ms: i64) -> String {
    describe_timestamp_at(timestamp_ms, now_millis(), &Local)
}

/// Describes how long before `now_ms` the instant `timestamp_ms` was.
///
/// - in the future: empty string
/// - under a minute: `just now`
/// - under an hour: `N minutes ago`
/// - under a day: `N hours ago`
/// - otherwise the absolute date in `tz`
pub fn describe_timestamp_at<Tz>(timestamp_ms: i64, now_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed = now_ms.saturating_sub(timestamp_ms);
    match elapsed {
        ..0 => String::new(),
        0..MINUTE_MS => "just now".to_string(),
        MINUTE_MS..HOUR_MS => plural(elapsed / MINUTE_MS, "minute"),
        HOUR_MS..DAY_MS => plural(elapsed / HOUR_MS, "hour"),
        _ => format_timestamp_in(timestamp_ms, tz).unwrap_or_default(),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
