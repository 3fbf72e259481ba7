//! UTC date helpers for note timestamps.
//!
//! Notes carry creation times as `YYYY-MM-DD HH:MM:SS.sssZ`; RFC 3339 input is
//! accepted as well.

use chrono::{DateTime, NaiveDateTime, Utc};

const UTC_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3fZ";
const UTC_DATE_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses a note timestamp into an absolute instant.
///
/// Returns `None` for blank or malformed input.
pub fn parse_utc_date_time(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(naive, UTC_DATE_PARSE_FORMAT)
        .ok()
        .map(|value| value.and_utc())
}

/// Formats an instant in the canonical note timestamp form.
pub fn format_utc_date_time(value: DateTime<Utc>) -> String {
    value.format(UTC_DATE_FORMAT).to_string()
}
