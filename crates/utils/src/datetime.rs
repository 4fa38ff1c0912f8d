use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};

/// Whole unix seconds for a file time.
///
/// Unreadable times and times before the epoch map to `None`.
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn system_time_to_timestamp(time: std::io::Result<SystemTime>) -> Option<i64> {
    time.ok()
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
}

/// Renders a unix timestamp as RFC 3339; `0` means no file was found.
#[must_use]
pub fn format_timestamp(timestamp: i64) -> String {
    if timestamp == 0 {
        return "never".to_string();
    }
    DateTime::<Utc>::from_timestamp(timestamp, 0).map_or_else(
        || format!("@{timestamp}"),
        |dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
