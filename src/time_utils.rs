use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// `DDD HH:mm:ss` x-axis label in the browser's local time zone.
pub fn format_time_label(timestamp_ms: u64) -> String {
    format_time_label_in(timestamp_ms, &Local)
}

/// Same label in an explicit zone. Out-of-range timestamps give an empty label.
pub fn format_time_label_in<Tz>(timestamp_ms: u64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|utc| utc.with_timezone(tz).format("%a %H:%M:%S").to_string())
        .unwrap_or_default()
}
