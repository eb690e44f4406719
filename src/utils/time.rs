//! Time helpers

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// RFC 1123 layout without the zone, as used by `chrono` formatting.
const RFC1123_LAYOUT: &str = "%a, %d %b %Y %H:%M:%S";

/// Strict RFC 1123 shape: two-digit day and a zone abbreviation.
static RFC1123_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][a-z]{2}, \d{2} [A-Z][a-z]{2} \d{4} \d{2}:\d{2}:\d{2}) ([A-Z]{2,5})$")
        .expect("valid regex")
});

pub fn now_in_milli() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole seconds in `duration`, truncated.
pub fn to_seconds(duration: Duration) -> u64 {
    duration.as_secs()
}

/// Format `timestamp` in UTC as an RFC 1123 HTTP date (`... GMT`).
pub fn format_rfc1123<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    format!("{} GMT", timestamp.with_timezone(&Utc).format(RFC1123_LAYOUT))
}

/// Parse an RFC 1123 string and compare it with `timestamp`.
///
/// `UTC`, `GMT` and `UT` are read as UTC; any other zone abbreviation is
/// taken to name the zone `tz`. Unparseable text compares unequal.
pub fn compare_time_and_time_string<Tz: TimeZone>(
    timestamp: &DateTime<Utc>,
    compare: &str,
    tz: &Tz,
) -> bool {
    parse_rfc1123(compare, tz).is_some_and(|parsed| parsed == *timestamp)
}

fn parse_rfc1123<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let captures = RFC1123_PATTERN.captures(text)?;
    let naive = NaiveDateTime::parse_from_str(&captures[1], RFC1123_LAYOUT).ok()?;

    match &captures[2] {
        "UTC" | "GMT" | "UT" => Some(Utc.from_utc_datetime(&naive)),
        _ => tz.from_local_datetime(&naive).single().map(|dt| dt.with_timezone(&Utc)),
    }
}
