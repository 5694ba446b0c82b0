use chrono::{Local, TimeZone};

/// Format a unix millisecond timestamp as wall-clock `HH:MM:SS.mmm`.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%H:%M:%S%.3f").to_string(),
        None => format!("Invalid timestamp: {}", timestamp_ms),
    }
}
