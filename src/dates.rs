//! Report date repair and parsing.
//!
//! Raw dates are `month/day/year` with the day (or the month and day)
//! sometimes left as a run of whitespace. A blank day is rewritten to `1`
//! before parsing, so reports with an unknown day bucket as the 1st of the
//! known month instead of being dropped.

use chrono::{Datelike, NaiveDate};

/// Normalize a raw date string into a calendar date.
///
/// Repair rules, applied before parsing:
/// - `M/  /Y` → `M/1/Y` (blank day, explicit month)
/// - `  /  /Y` → `1/1/Y` (blank month and day)
///
/// Returns `None` for empty input, a blank year, a blank month with an
/// explicit day, or anything that fails calendar validation. Never yields a
/// partially-valid date.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parts: Vec<&str> = raw.split('/').map(str::trim).collect();
    let [month, day, year] = parts.as_slice() else {
        return None;
    };
    if year.is_empty() {
        return None;
    }

    let (month, day) = match (month.is_empty(), day.is_empty()) {
        (false, true) => (*month, "1"),
        (true, true) => ("1", "1"),
        _ => (*month, *day),
    };

    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The year-month bucket a date falls in (first of its month).
pub fn month_bucket(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_date() {
        assert_eq!(normalize_date("3/12/1998"), Some(ymd(1998, 3, 12)));
        assert_eq!(normalize_date(" 11/5/2003 "), Some(ymd(2003, 11, 5)));
    }

    #[test]
    fn test_blank_day_repaired_to_first() {
        assert_eq!(normalize_date("3/  /1998"), normalize_date("3/1/1998"));
        assert_eq!(normalize_date("3/  /1998"), Some(ymd(1998, 3, 1)));
    }

    #[test]
    fn test_blank_month_and_day_repaired() {
        assert_eq!(normalize_date("  /  /1998"), Some(ymd(1998, 1, 1)));
    }

    #[test]
    fn test_blank_month_with_explicit_day_is_absent() {
        // Only the two repair sub-patterns are recognized.
        assert_eq!(normalize_date("  /5/1998"), None);
    }

    #[test]
    fn test_empty_and_garbage_are_absent() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date("3/12"), None);
        assert_eq!(normalize_date("3/12/"), None);
    }

    #[test]
    fn test_invalid_calendar_date_is_absent() {
        assert_eq!(normalize_date("2/30/1998"), None);
        assert_eq!(normalize_date("13/1/1998"), None);
        assert_eq!(normalize_date("0/1/1998"), None);
    }

    #[test]
    fn test_month_bucket() {
        assert_eq!(month_bucket(ymd(1998, 3, 27)), ymd(1998, 3, 1));
        assert_eq!(month_bucket(ymd(1998, 3, 1)), ymd(1998, 3, 1));
    }
}
