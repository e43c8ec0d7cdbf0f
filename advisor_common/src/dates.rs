//! Best-effort calendar date coercion.
//!
//! Source files disagree on how they write dates: plain ISO days, US style
//! slashes, intraday timestamps with or without a UTC offset. Every accepted
//! form collapses to the calendar day as written; anything else yields `None`
//! so the caller can drop the row instead of failing the whole file.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parses `raw` as a calendar date, returning `None` when no known layout fits.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(value, fmt) {
            return Some(ts.date_naive());
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(ts.date());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_plain_dates() {
        assert_eq!(parse_date("2024-01-02"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("2024/01/02"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("01/02/2024"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("  2024-01-02 "), Some(day(2024, 1, 2)));
    }

    #[test]
    fn accepts_compact_and_month_name_dates() {
        assert_eq!(parse_date("20240102"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("Jan 2 2024"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("Jan 2, 2024"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("January 02, 2024"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("02-Jan-2024"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("2024"), None);
    }

    #[test]
    fn keeps_the_written_day_of_timestamps() {
        assert_eq!(parse_date("2024-01-02 09:30:00"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("2024-01-02T23:59:59.250"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("2024-01-02 09:30:00-05:00"), Some(day(2024, 1, 2)));
        assert_eq!(parse_date("2024-01-02T22:00:00+09:00"), Some(day(2024, 1, 2)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }
}
