//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parse a front-matter date string.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and plain `YYYY-MM-DD`.
/// Returns `None` when the string matches none of these.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Whole days elapsed between `date` and `now`, rounded up.
///
/// An unparseable date falls back to the Unix epoch, so the result is a
/// very large day count rather than an error.
pub fn days_since(now: DateTime<Utc>, raw_date: &str) -> i64 {
    let date = parse_date(raw_date)
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).single().unwrap_or_default());
    let seconds = (now - date).num_seconds().abs();
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// Sortable timestamp key for calendar-aware ordering; unparseable dates
/// sort as the epoch.
pub fn sort_key(raw: &str) -> i64 {
    parse_date(raw).map(|d| d.timestamp()).unwrap_or(0)
}

/// Format a timestamp as `YYYY-MM-DD` (the sitemap lastmod format)
pub fn format_ymd(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
