use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time as an RFC 3339 string with millisecond precision,
/// e.g. `2024-01-01T00:00:00.000Z`
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Milliseconds since the Unix epoch
pub fn current_timestamp_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Format an RFC 3339 timestamp as a readable date, falling back to the raw
/// value when it does not parse
pub fn format_timestamp(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
