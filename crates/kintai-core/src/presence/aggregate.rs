//! Pure aggregation functions over a single user's presence data.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use super::DayPresence;

/// Seconds elapsed since midnight for a wall-clock time.
#[must_use]
pub fn seconds_since_midnight(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 3600 + i64::from(t.minute()) * 60 + i64::from(t.second())
}

/// Interval in seconds between two wall-clock times.
///
/// Negative when `end` precedes `start`; the raw value is kept and callers
/// treat it as data (overnight oddities in the source).
#[must_use]
pub fn interval(start: NaiveTime, end: NaiveTime) -> i64 {
    seconds_since_midnight(end) - seconds_since_midnight(start)
}

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// ## Summary
/// Buckets each date's presence interval by weekday, Monday = index 0.
///
/// The same weekday across different weeks accumulates in one bucket.
#[must_use]
pub fn group_by_weekday(days: &BTreeMap<NaiveDate, DayPresence>) -> [Vec<i64>; 7] {
    let mut buckets: [Vec<i64>; 7] = std::array::from_fn(|_| Vec::new());
    for (date, day) in days {
        let weekday = date.weekday().num_days_from_monday() as usize;
        buckets[weekday].push(interval(day.start, day.end));
    }
    buckets
}

/// ## Summary
/// Per-weekday mean start and end seconds across all dates falling on that
/// weekday. Weekdays with no data yield `(0.0, 0.0)`.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn mean_start_end_by_weekday(days: &BTreeMap<NaiveDate, DayPresence>) -> [(f64, f64); 7] {
    let mut starts: [Vec<f64>; 7] = std::array::from_fn(|_| Vec::new());
    let mut ends: [Vec<f64>; 7] = std::array::from_fn(|_| Vec::new());
    for (date, day) in days {
        let weekday = date.weekday().num_days_from_monday() as usize;
        starts[weekday].push(seconds_since_midnight(day.start) as f64);
        ends[weekday].push(seconds_since_midnight(day.end) as f64);
    }
    std::array::from_fn(|weekday| (mean(&starts[weekday]), mean(&ends[weekday])))
}

/// Worked hours summed per calendar month, one column per observed year.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyHours {
    /// Observed years, ascending.
    pub years: Vec<i32>,
    /// `cells[month][year_index]`, months January..December.
    pub cells: Vec<Vec<f64>>,
}

/// ## Summary
/// Sums presence intervals per (year, month) and converts them to hours.
///
/// Cells for (month, year) pairs absent from the data are `0.0`. Year
/// columns are ordered ascending.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn monthly_worked_hours(days: &BTreeMap<NaiveDate, DayPresence>) -> MonthlyHours {
    let mut totals: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for (date, day) in days {
        *totals.entry((date.year(), date.month())).or_insert(0) += interval(day.start, day.end);
    }

    let years: Vec<i32> = totals
        .keys()
        .map(|&(year, _)| year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let cells = (1..=12)
        .map(|month| {
            years
                .iter()
                .map(|&year| {
                    totals
                        .get(&(year, month))
                        .map_or(0.0, |&secs| secs as f64 / 3600.0)
                })
                .collect()
        })
        .collect();

    MonthlyHours { years, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: (i32, u32, u32), start: (u32, u32, u32), end: (u32, u32, u32)) -> (NaiveDate, DayPresence) {
        (
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            DayPresence {
                start: NaiveTime::from_hms_opt(start.0, start.1, start.2).unwrap(),
                end: NaiveTime::from_hms_opt(end.0, end.1, end.2).unwrap(),
            },
        )
    }

    #[test]
    fn seconds_since_midnight_sums_components() {
        let t = NaiveTime::from_hms_opt(8, 10, 9).unwrap();
        assert_eq!(seconds_since_midnight(t), 29409);
    }

    #[test]
    fn interval_between_times() {
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(10, 10, 10).unwrap();
        assert_eq!(interval(start, end), 7810);
    }

    #[test]
    fn interval_goes_negative_when_end_precedes_start() {
        let start = NaiveTime::from_hms_opt(10, 10, 10).unwrap();
        let end = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(interval(start, end), -7810);
    }

    #[test]
    fn mean_of_empty_slice_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_of_values() {
        let mut values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&values), 3.0);
        values.push(9.7);
        assert_eq!(mean(&values), 4.116666666666666);
    }

    #[test]
    fn single_tuesday_lands_in_bucket_one() {
        // 2013-09-10 was a Tuesday
        let days = BTreeMap::from([day((2013, 9, 10), (9, 0, 0), (17, 30, 0))]);
        let buckets = group_by_weekday(&days);

        assert!(buckets[0].is_empty());
        assert_eq!(buckets[1].len(), 1);
        assert_eq!(buckets[1][0], 8 * 3600 + 30 * 60);
    }

    #[test]
    fn same_weekday_across_weeks_accumulates() {
        let days = BTreeMap::from([
            day((2013, 9, 10), (9, 0, 0), (17, 0, 0)),
            day((2013, 9, 17), (10, 0, 0), (16, 0, 0)),
        ]);
        let buckets = group_by_weekday(&days);
        assert_eq!(buckets[1], vec![8 * 3600, 6 * 3600]);
    }

    #[test]
    fn mean_start_end_per_weekday() {
        // Two Thursdays a year apart.
        let days = BTreeMap::from([
            day((2013, 9, 12), (11, 47, 46), (15, 52, 43)),
            day((2014, 9, 11), (9, 1, 0), (17, 16, 0)),
        ]);
        let means = mean_start_end_by_weekday(&days);

        assert_eq!(means[3], (37463.0, 59661.5));
        assert_eq!(means[0], (0.0, 0.0));
    }

    #[test]
    fn monthly_hours_one_column_per_year_ascending() {
        let days = BTreeMap::from([
            day((2014, 9, 11), (9, 1, 0), (17, 16, 0)),
            day((2013, 9, 12), (11, 47, 46), (15, 52, 43)),
        ]);
        let monthly = monthly_worked_hours(&days);

        assert_eq!(monthly.years, vec![2013, 2014]);
        assert_eq!(monthly.cells.len(), 12);
        // September is row index 8.
        assert_eq!(monthly.cells[8], vec![14697.0 / 3600.0, 29700.0 / 3600.0]);
        // Months with no data are all zeros.
        assert_eq!(monthly.cells[0], vec![0.0, 0.0]);
    }

    #[test]
    fn monthly_hours_sums_within_a_month() {
        let days = BTreeMap::from([
            day((2013, 9, 10), (9, 0, 0), (17, 0, 0)),
            day((2013, 9, 11), (9, 0, 0), (13, 0, 0)),
        ]);
        let monthly = monthly_worked_hours(&days);
        assert_eq!(monthly.cells[8], vec![12.0]);
    }

    #[test]
    fn monthly_hours_empty_input() {
        let monthly = monthly_worked_hours(&BTreeMap::new());
        assert!(monthly.years.is_empty());
        assert_eq!(monthly.cells.len(), 12);
        assert!(monthly.cells.iter().all(Vec::is_empty));
    }
}
