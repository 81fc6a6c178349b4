//! Count summaries for the location and time views.

use std::collections::HashMap;

use chrono::NaiveDate;
use report_types::{LocationCount, Report, TimelineBucket};

use crate::dates::month_bucket;
use crate::places::UNKNOWN_PLACE;

/// Occurrences of each non-`Unknown` cleaned location across all reports.
///
/// A report naming the same location through two raw place strings counts
/// twice; there is no within-report dedup. Sorted descending by count, ties
/// broken by first appearance (the sort is stable over insertion order).
pub fn location_counts(reports: &[Report]) -> Vec<LocationCount> {
    let mut order: Vec<String> = Vec::new();
    let mut tally: HashMap<String, usize> = HashMap::new();

    for report in reports {
        for place in &report.places_clean {
            if place == UNKNOWN_PLACE {
                continue;
            }
            let count = tally.entry(place.clone()).or_insert(0);
            if *count == 0 {
                order.push(place.clone());
            }
            *count += 1;
        }
    }

    let mut counts: Vec<LocationCount> = order
        .into_iter()
        .map(|location| {
            let count = tally[&location];
            LocationCount { location, count }
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Dated reports bucketed per year-month, ascending. Reports with an absent
/// date are excluded entirely.
pub fn timeline_buckets(reports: &[Report]) -> Vec<TimelineBucket> {
    let mut tally: HashMap<NaiveDate, usize> = HashMap::new();
    for report in reports {
        if let Some(date) = report.date {
            *tally.entry(month_bucket(date)).or_insert(0) += 1;
        }
    }

    let mut buckets: Vec<TimelineBucket> = tally
        .into_iter()
        .map(|(date, count)| TimelineBucket { date, count })
        .collect();
    buckets.sort_by_key(|b| b.date);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str, date: Option<NaiveDate>, places_clean: &[&str]) -> Report {
        Report {
            id: id.to_string(),
            date,
            persons: Vec::new(),
            persons_resolved: Vec::new(),
            organizations: Vec::new(),
            places: Vec::new(),
            places_clean: places_clean.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_location_counts_descending_with_stable_ties() {
        let reports = vec![
            report("r1", None, &["CityA", "CityB"]),
            report("r2", None, &["CityB"]),
            report("r3", None, &["CityC"]),
        ];
        let counts = location_counts(&reports);
        assert_eq!(counts[0].location, "CityB");
        assert_eq!(counts[0].count, 2);
        // CityA and CityC tie at 1; CityA appeared first.
        assert_eq!(counts[1].location, "CityA");
        assert_eq!(counts[2].location, "CityC");
    }

    #[test]
    fn test_within_report_duplicates_double_count() {
        let reports = vec![report("r1", None, &["CityA", "CityA"])];
        let counts = location_counts(&reports);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn test_unknown_excluded_from_location_counts() {
        let reports = vec![report("r1", None, &["Unknown", "CityA"])];
        let counts = location_counts(&reports);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].location, "CityA");
    }

    #[test]
    fn test_location_total_matches_clean_entries() {
        let reports = vec![
            report("r1", None, &["CityA", "Unknown", "CityB"]),
            report("r2", None, &["CityA"]),
        ];
        let total: usize = location_counts(&reports).iter().map(|c| c.count).sum();
        let expected = reports
            .iter()
            .flat_map(|r| &r.places_clean)
            .filter(|p| *p != "Unknown")
            .count();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_timeline_buckets_ascending_per_month() {
        let reports = vec![
            report("r1", Some(ymd(1998, 3, 14)), &[]),
            report("r2", Some(ymd(1998, 3, 2)), &[]),
            report("r3", Some(ymd(1997, 12, 31)), &[]),
            report("r4", None, &[]),
        ];
        let buckets = timeline_buckets(&reports);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, ymd(1997, 12, 1));
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].date, ymd(1998, 3, 1));
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn test_timeline_total_matches_dated_reports() {
        let reports = vec![
            report("r1", Some(ymd(1998, 1, 1)), &[]),
            report("r2", None, &[]),
            report("r3", Some(ymd(1999, 6, 9)), &[]),
        ];
        let total: usize = timeline_buckets(&reports).iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }
}
