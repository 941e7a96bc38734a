use crate::server::error::AppError;

/// Wraps a numeric principal id in the `xuid(...)` form upstream URLs expect.
///
/// # Arguments
/// - `xuid` - Numeric principal id
///
/// # Returns
/// - `String` - The wrapped form, e.g. `"xuid(2533274870001169)"`
pub fn wrap_xuid(xuid: u64) -> String {
    format!("xuid({})", xuid)
}

/// Parses a numeric principal id from either the wrapped `xuid(...)` form or
/// a plain digit string.
///
/// # Arguments
/// - `value` - The string to parse
///
/// # Returns
/// - `Some(u64)` - Successfully parsed principal id
/// - `None` - The string is neither a wrapped xuid nor a digit string
pub fn parse_xuid(value: &str) -> Option<u64> {
    let digits = value
        .strip_prefix("xuid(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(value);

    digits.parse::<u64>().ok()
}

/// Parses a comma-separated list of principal ids from a query parameter.
///
/// # Arguments
/// - `value` - Comma-separated xuids, wrapped or plain
///
/// # Returns
/// - `Ok(Vec<u64>)` - All entries parsed
/// - `Err(AppError::BadRequest)` - An entry could not be parsed
pub fn parse_xuid_list(value: &str) -> Result<Vec<u64>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            parse_xuid(part)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid xuid: '{}'", part)))
        })
        .collect()
}
