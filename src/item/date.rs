//! Publish date parsing.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Date-time layouts without an offset; interpreted in local time.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Minute-precision layouts carrying an explicit offset.
const OFFSET_MINUTE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Parse a `publish` value as a point in time.
///
/// Supported formats:
/// - RFC 3339: `2024-01-15T10:30:00Z`, `2024-01-15T10:30:00+02:00`
/// - Minutes with an offset: `2024-01-15T10:30Z`, `2024-01-15T10:30+02:00`
/// - RFC 2822: `Mon, 15 Jan 2024 10:30:00 +0000`
/// - Date only: `2024-01-15` (midnight UTC)
/// - Year and month: `2024-01` (first of the month, midnight UTC)
/// - Year: `2024` (January 1st, midnight UTC)
/// - Date and time without offset: `2024-01-15 10:30`, `2024-01-15T10:30:00` (local time)
/// - Slashed date: `2024/01/15` (local midnight)
///
/// Returns `None` for anything else; callers treat that as "not in the future".
pub fn parse_publish_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = parse_minute_with_offset(input) {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight));
    }
    if let Some(dt) = parse_year_month(input) {
        return Some(dt);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(&naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y/%m/%d") {
        return local_to_utc(&date.and_hms_opt(0, 0, 0)?);
    }

    None
}

fn parse_minute_with_offset(input: &str) -> Option<DateTime<Utc>> {
    if let Some(naive) = input.strip_suffix('Z').or_else(|| input.strip_suffix('z')) {
        return NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|dt| Utc.from_utc_datetime(&dt));
    }
    OFFSET_MINUTE_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// `YYYY` or `YYYY-MM`, as UTC midnight on the first day of the period.
fn parse_year_month(input: &str) -> Option<DateTime<Utc>> {
    let bytes = input.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    let (year, month) = match bytes.len() {
        4 if digits(0..4) => (input.parse().ok()?, 1),
        7 if digits(0..4) && bytes[4] == b'-' && digits(5..7) => {
            (input[..4].parse().ok()?, input[5..].parse().ok()?)
        }
        _ => return None,
    };
    let midnight = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

fn local_to_utc(naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
