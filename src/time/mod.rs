//! Date and time helpers built on `chrono`.

pub mod convert;
pub mod describe;

pub use {
    convert::{
        DATE_TIME_FORMAT, datetime_to_timestamp, day_of_month, day_of_week, day_of_year,
        format_timestamp, format_timestamp_in, month, now_millis, timestamp_delta, timestamp_in,
        timestamp_to_datetime, year,
    },
    describe::{describe_timestamp, describe_timestamp_at},
};
