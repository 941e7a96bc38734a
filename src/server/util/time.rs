use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an upstream ISO-like timestamp, truncating to whole seconds UTC.
///
/// The identity and XSTS providers return timestamps with seven fractional
/// digits and a `Z` suffix (e.g. `"2026-01-10T21:33:02.1351391Z"`); the
/// spartan token endpoint returns the same shape without a suffix. Fractional
/// seconds and the timezone suffix are discarded before persisting so stored
/// expiry comparisons are stable at second precision.
///
/// # Arguments
/// - `raw` - The upstream timestamp string
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Timestamp truncated to whole seconds
/// - `Err(chrono::ParseError)` - The string is not an ISO-like timestamp
pub fn parse_upstream_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let trimmed = raw.trim_end_matches('Z');
    let seconds = trimmed.split('.').next().unwrap_or(trimmed);

    NaiveDateTime::parse_from_str(seconds, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.and_utc())
}
