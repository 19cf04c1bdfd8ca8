//! Fuzzy date/time parsing.
//!
//! Free-text collection dates come in many shapes. Ambiguous numeric dates are
//! read month-first (`01/02/2024` is January 2). Partial dates resolve to the
//! first day of the period: `2024-05` and `May 2024` to May 1, `2024` to
//! January 1.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%Y%m%d",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Two-digit-year variants, tried after every four-digit-year format failed.
const SHORT_YEAR_DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m-%d-%y", "%m.%d.%y"];
const SHORT_YEAR_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m-%d-%y %H:%M:%S",
    "%m-%d-%y %H:%M",
];

const YEAR_MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%m/%Y", "%b %Y", "%B %Y", "%b, %Y", "%B, %Y"];

/// Parse a free-text date or date/time.
///
/// Returns `None` for empty or unparseable input. Dates without a time part
/// are placed at midnight.
pub fn parse_fuzzy_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    if let Some(dt) = try_parse_datetime(trimmed) {
        return Some(dt);
    }

    if let Some(d) = try_parse_date(trimmed) {
        return Some(d.and_time(NaiveTime::MIN));
    }

    try_parse_partial(trimmed).map(|d| d.and_time(NaiveTime::MIN))
}

/// Format as `YYYY-MM-DD HH:MM`.
pub fn format_minute_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let full = DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .find(|dt| has_full_year(dt.year()));
    full.or_else(|| {
        SHORT_YEAR_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    })
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    // `%Y` also accepts short years, so `01/02/24` would land in year 24.
    let full = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .find(|d| has_full_year(d.year()));
    full.or_else(|| {
        SHORT_YEAR_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    })
}

fn try_parse_partial(value: &str) -> Option<NaiveDate> {
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        let year = value.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).filter(|d| has_full_year(d.year()));
    }

    let padded = format!("{value} 01");
    YEAR_MONTH_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(&padded, &format!("{fmt} %d")).ok())
        .find(|d| has_full_year(d.year()))
}

fn has_full_year(year: i32) -> bool {
    (1000..=9999).contains(&year)
}
