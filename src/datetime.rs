//! Date/time utilities for File Drawer.
//!
//! Timestamps are stored by SQLite as `YYYY-MM-DD HH:MM:SS.fff` in UTC.

/// Convert a stored UTC timestamp to RFC3339 for API output.
pub fn to_rfc3339(datetime_str: &str) -> String {
    if datetime_str.ends_with('Z') || datetime_str.contains('+') {
        return datetime_str.to_string();
    }
    format!("{}Z", datetime_str.replace(' ', "T"))
}
