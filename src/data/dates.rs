//! Date Parsing Module
//! Lenient calendar-date parsing; failures become `None`, never errors.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Days from 0001-01-01 (CE) to 1970-01-01, polars' `Date` epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date-only formats, month-first preferred over day-first.
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%d/%m/%y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a calendar date from free-form text.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        let Ok(date) = NaiveDate::parse_from_str(value, format) else {
            continue;
        };
        // %Y also accepts "19"; leave short years to the %y forms
        if format.contains("%Y") && date.year() < 1000 {
            continue;
        }
        return Some(date);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}

/// Days since 1970-01-01, the physical value of a polars `Date`.
pub fn to_epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Inverse of [`to_epoch_days`].
pub fn from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_first_preferred() {
        assert_eq!(parse_date("01/02/2019"), Some(ymd(2019, 1, 2)));
    }

    #[test]
    fn test_day_first_fallback() {
        assert_eq!(parse_date("13/02/2019"), Some(ymd(2019, 2, 13)));
        assert_eq!(parse_date("05.09.2017"), Some(ymd(2017, 9, 5)));
    }

    #[test]
    fn test_iso_and_datetime() {
        assert_eq!(parse_date("2020-03-15"), Some(ymd(2020, 3, 15)));
        assert_eq!(parse_date(" 2020-03-15 10:30:00 "), Some(ymd(2020, 3, 15)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_date("01/02/19"), Some(ymd(2019, 1, 2)));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_date("bad-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("31/31/2019"), None);
    }

    #[test]
    fn test_epoch_days() {
        assert_eq!(to_epoch_days(ymd(1970, 1, 1)), 0);
        assert_eq!(to_epoch_days(ymd(1970, 1, 2)), 1);
        assert_eq!(from_epoch_days(to_epoch_days(ymd(2019, 1, 2))), Some(ymd(2019, 1, 2)));
    }
}
