//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats accepted for front-matter dates, tried in order
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a front-matter date string in one of the supported formats
///
/// Offsets are normalised to UTC so that mixed forms still order correctly.
/// Date-only values become midnight.
///
/// # Examples
/// ```ignore
/// parse_date_string("2021-01-05") // -> 2021-01-05T00:00:00
/// ```
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Format a date in W3C datetime form, as used by sitemaps
pub fn date_xml(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
}
