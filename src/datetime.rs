//! Timestamp parsing and local-time rendering.
//!
//! Listing dates travel as ISO 8601 strings. Both the sorter and the renderer
//! go through [`parse_timestamp`], and both treat anything unparseable as
//! "no date" rather than an error: the sorter orders it as the epoch, the
//! renderer prints nothing.

use std::fmt::{self, Write as _};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Rendering that mirrors `toLocaleString()` in an `en-US` browser,
/// e.g. `1/2/2024, 3:04:05 PM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Format used for machine-readable listing dates.
const ISO_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    // Rendered listing dates, as written by DEFAULT_TIME_FORMAT
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Parse an ISO 8601 / RFC 3339 / RFC 2822 timestamp, or a date rendered with
/// [`DEFAULT_TIME_FORMAT`] (in either case).
///
/// Date-times without an offset and bare dates are taken as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    // Accept lowercase `t`/`z` separators, which show up when display text is
    // lowercased before parsing.
    let upper = input.to_ascii_uppercase();

    if let Ok(dt) = DateTime::parse_from_rfc3339(&upper) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&upper, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Milliseconds since the epoch, or `0` when `input` is not a timestamp.
pub fn timestamp_millis_or_zero(input: &str) -> f64 {
    parse_timestamp(input)
        .map(|dt| dt.timestamp_millis() as f64)
        .unwrap_or(0.0)
}

/// Render `datetime` in `tz` using a strftime `format`.
///
/// Returns an empty string for a missing or unparseable timestamp, and for a
/// format string chrono cannot render.
pub fn render_time_in<Tz>(datetime: Option<&str>, tz: &Tz, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(parsed) = datetime.and_then(parse_timestamp) else {
        return String::new();
    };

    let mut out = String::new();
    match write!(out, "{}", parsed.with_timezone(tz).format(format)) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

/// Render `datetime` in the machine's local time zone.
pub fn render_local_time(datetime: Option<&str>, format: &str) -> String {
    render_time_in(datetime, &Local, format)
}

/// Format a filesystem timestamp as `YYYY-MM-DDTHH:MM:SS+00:00`.
pub fn format_iso_utc(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(ISO_UTC_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_parse_rfc3339_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:00:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01t00:00:00z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T02:00:00+02:00"), Some(expected));
    }

    #[test]
    fn test_parse_naive_and_date_only_as_utc() {
        let expected = Utc.with_ymd_and_hms(2023, 6, 15, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2023-06-15T12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-06-15 12:30"), Some(expected));

        let midnight = Utc.with_ymd_and_hms(2023, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2023-06-15"), Some(midnight));
    }

    #[test]
    fn test_parse_default_rendering() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).unwrap();
        let rendered = render_time_in(Some("2024-01-02T15:04:05Z"), &Utc, DEFAULT_TIME_FORMAT);
        assert_eq!(rendered, "1/2/2024, 3:04:05 PM");

        assert_eq!(parse_timestamp(&rendered), Some(expected));
        assert_eq!(parse_timestamp(&rendered.to_lowercase()), Some(expected));
        assert_eq!(
            parse_timestamp("12/31/2023, 12:00:00 am"),
            Some(Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rfc2822() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(
            parse_timestamp("Fri, 01 Mar 2024 10:00:00 +0000"),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }

    #[test]
    fn test_millis_or_zero() {
        assert_eq!(timestamp_millis_or_zero("1970-01-01T00:00:01Z"), 1000.0);
        assert_eq!(timestamp_millis_or_zero("garbage"), 0.0);
        assert!(timestamp_millis_or_zero("2024-01-01") > timestamp_millis_or_zero("2023-01-01"));
    }

    #[test]
    fn test_render_time_in_zone() {
        let rendered = render_time_in(Some("2024-01-02T15:04:05Z"), &Utc, DEFAULT_TIME_FORMAT);
        assert_eq!(rendered, "1/2/2024, 3:04:05 PM");

        let tehran = FixedOffset::east_opt(3 * 3600 + 1800).unwrap();
        let rendered = render_time_in(Some("2024-01-02T15:04:05Z"), &tehran, "%Y-%m-%d %H:%M");
        assert_eq!(rendered, "2024-01-02 18:34");
    }

    #[test]
    fn test_render_unparseable_is_empty() {
        assert_eq!(render_time_in(Some("nope"), &Utc, DEFAULT_TIME_FORMAT), "");
        assert_eq!(render_time_in(None, &Utc, DEFAULT_TIME_FORMAT), "");
        assert_eq!(render_local_time(Some(""), DEFAULT_TIME_FORMAT), "");
    }

    #[test]
    fn test_render_invalid_format_is_empty() {
        assert_eq!(render_time_in(Some("2024-01-01"), &Utc, "%Q"), "");
    }

    #[test]
    fn test_format_iso_utc() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(format_iso_utc(time), "2023-11-14T22:13:20+00:00");
    }
}
