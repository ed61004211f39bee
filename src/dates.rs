//! Date parsing and formatting for HIE payloads.
//!
//! The HIE API is inconsistent about date shapes: license windows come back
//! as calendar dates (`2024-01-10`), while some records carry full
//! timestamps. Everything is normalised to a UTC instant here so that
//! comparisons always use full epoch-time differences.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a date or timestamp into a UTC instant.
///
/// Accepted shapes, in order:
/// - RFC 3339 (`2024-01-10T08:00:00+03:00`, `2024-01-10T05:00:00Z`)
/// - date only (`2024-01-10`), read as midnight UTC
/// - timestamp without offset (`2024-01-10T08:00:00`, optional fraction), read as UTC
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Format a date for display, e.g. `2024-01-05` → `Jan 5, 2024`.
///
/// Empty input gives an empty string; unparseable input is returned as-is.
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }

    match parse_instant(value) {
        Some(instant) => instant.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}
