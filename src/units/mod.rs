//! Screen unit and byte count conversions.

pub mod bytes;
pub mod metrics;

pub use {bytes::format_byte_count, metrics::DisplayMetrics};
