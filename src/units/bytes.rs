//! Human-readable byte counts.

const KB: i64 = 1024;
const MB: i64 = 1024 * KB;
const GB: i64 = 1024 * MB;
const TB: i64 = 1024 * GB;

/// Formats a byte count with two decimals in the largest fitting unit.
///
/// - 512 → "512.00B"
/// - 1536 → "1.50KB"
/// - 5 * 1024^3 → "5.00GB"
///
/// # Returns
///
/// `None` for negative sizes.
#[must_use]
pub fn format_byte_count(size: i64) -> Option<String> {
    if size < 0 {
        return None;
    }

    let (unit, suffix) = match size {
        ..KB => (1, "B"),
        KB..MB => (KB, "KB"),
        MB..GB => (MB, "MB"),
        GB..TB => (GB, "GB"),
        _ => (TB, "TB"),
    };
    Some(format!("{:.2}{}", size as f64 / unit as f64, suffix))
}
