//! Temporal aggregation over classified event buckets.
//!
//! All functions take buckets whose event times are already resolved into
//! the reporting timezone; hours are fractional (`seconds / 3600`).

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::classify::PatternBucket;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Fractional hours in a duration.
pub fn hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DayOfWeekStats {
    pub count: usize,
    pub total_hours: f64,
    pub avg_hours: f64,
}

#[derive(Debug, Clone)]
pub struct PatternDayDistribution {
    pub name: String,
    /// Indexed Monday..Sunday.
    pub days: [DayOfWeekStats; 7],
}

/// Per pattern, how events distribute over the days of the week.
pub fn day_of_week_stats(buckets: &[PatternBucket]) -> Vec<PatternDayDistribution> {
    buckets
        .iter()
        .map(|bucket| {
            let mut days = [DayOfWeekStats::default(); 7];
            for event in &bucket.events {
                let day = &mut days[event.start.weekday().num_days_from_monday() as usize];
                day.count += 1;
                day.total_hours += hours(event.duration);
            }
            for day in &mut days {
                if day.count > 0 {
                    day.avg_hours = day.total_hours / day.count as f64;
                }
            }
            PatternDayDistribution {
                name: bucket.name.clone(),
                days,
            }
        })
        .collect()
}

/// Per pattern, the total time spent.
pub fn total_time(buckets: &[PatternBucket]) -> Vec<(String, Duration)> {
    buckets
        .iter()
        .map(|bucket| {
            let total = bucket
                .events
                .iter()
                .fold(Duration::zero(), |acc, e| acc + e.duration);
            (bucket.name.clone(), total)
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WeekStats {
    pub total_hours: f64,
    /// Total spread over the seven days of the week.
    pub avg_hours_per_day: f64,
}

#[derive(Debug, Clone)]
pub struct PatternWeeklyStats {
    pub name: String,
    /// Keyed by the Monday of the event's week.
    pub weeks: BTreeMap<NaiveDate, WeekStats>,
}

/// Per pattern, hours bucketed by week. A week is identified by its Monday.
pub fn weekly_stats(buckets: &[PatternBucket]) -> Vec<PatternWeeklyStats> {
    buckets
        .iter()
        .map(|bucket| {
            let mut weeks: BTreeMap<NaiveDate, WeekStats> = BTreeMap::new();
            for event in &bucket.events {
                let date = event.start.date_naive();
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                weeks.entry(monday).or_default().total_hours += hours(event.duration);
            }
            for week in weeks.values_mut() {
                week.avg_hours_per_day = week.total_hours / 7.0;
            }
            PatternWeeklyStats {
                name: bucket.name.clone(),
                weeks,
            }
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MonthStats {
    pub total_hours: f64,
    /// Total spread over the real number of weeks in the month
    /// (days-in-month / 7).
    pub avg_hours_per_week: f64,
    pub event_count: usize,
}

#[derive(Debug, Clone)]
pub struct PatternMonthlyStats {
    pub name: String,
    /// Keyed by (year, month).
    pub months: BTreeMap<(i32, u32), MonthStats>,
}

/// Per pattern, hours bucketed by calendar month.
pub fn monthly_stats(buckets: &[PatternBucket]) -> Vec<PatternMonthlyStats> {
    buckets
        .iter()
        .map(|bucket| {
            let mut months: BTreeMap<(i32, u32), MonthStats> = BTreeMap::new();
            for event in &bucket.events {
                let date = event.start.date_naive();
                let month = months.entry((date.year(), date.month())).or_default();
                month.total_hours += hours(event.duration);
                month.event_count += 1;
            }
            for ((year, month), stats) in months.iter_mut() {
                let weeks_in_month = days_in_month(*year, *month) as f64 / 7.0;
                stats.avg_hours_per_week = stats.total_hours / weeks_in_month;
            }
            PatternMonthlyStats {
                name: bucket.name.clone(),
                months,
            }
        })
        .collect()
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    (next - first).num_days()
}

#[derive(Debug, Clone)]
pub struct DailySeries {
    pub name: String,
    /// One entry per day of the analysis range; `None` for zero-hour days.
    pub hours: Vec<Option<f64>>,
}

/// Per pattern, hours summed by the calendar day the event starts on.
/// Feeds the spreadsheet grid.
pub fn daily_hours(buckets: &[PatternBucket], days: &[NaiveDate]) -> Vec<DailySeries> {
    buckets
        .iter()
        .map(|bucket| {
            let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
            for event in &bucket.events {
                *by_day.entry(event.start.date_naive()).or_default() += hours(event.duration);
            }
            let hours = days
                .iter()
                .map(|day| by_day.get(day).copied().filter(|h| *h > 0.0))
                .collect();
            DailySeries {
                name: bucket.name.clone(),
                hours,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MatchedEvent;
    use chrono::TimeZone;
    use chrono_tz::America::Los_Angeles;
    use chrono_tz::Tz;

    fn matched(y: i32, m: u32, d: u32, h: u32, hours: i64) -> MatchedEvent {
        MatchedEvent {
            start: Los_Angeles.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            summary: "e".into(),
            duration: Duration::hours(hours),
        }
    }

    fn bucket(name: &str, events: Vec<MatchedEvent>) -> PatternBucket {
        PatternBucket {
            name: name.into(),
            events,
        }
    }

    #[test]
    fn weekday_buckets_count_and_average() {
        // 2024-06-03 is a Monday
        let buckets = vec![bucket(
            "work",
            vec![
                matched(2024, 6, 3, 9, 2),
                matched(2024, 6, 3, 14, 4),
                matched(2024, 6, 5, 9, 1),
            ],
        )];

        let dist = day_of_week_stats(&buckets);
        let monday = dist[0].days[0];
        assert_eq!(monday.count, 2);
        assert_eq!(monday.total_hours, 6.0);
        assert_eq!(monday.avg_hours, 3.0);

        let wednesday = dist[0].days[2];
        assert_eq!(wednesday.count, 1);
        assert_eq!(wednesday.avg_hours, 1.0);

        let friday = dist[0].days[4];
        assert_eq!(friday.count, 0);
        assert_eq!(friday.avg_hours, 0.0);
    }

    #[test]
    fn total_time_sums_durations() {
        let buckets = vec![
            bucket("work", vec![matched(2024, 6, 3, 9, 2), matched(2024, 6, 4, 9, 3)]),
            bucket("gym", vec![]),
        ];

        let totals = total_time(&buckets);
        assert_eq!(totals[0], ("work".to_string(), Duration::hours(5)));
        assert_eq!(totals[1], ("gym".to_string(), Duration::zero()));
    }

    #[test]
    fn weeks_are_keyed_by_monday() {
        // Sunday 2024-06-09 belongs to the week of Monday 2024-06-03;
        // Monday 2024-06-10 starts the next week.
        let buckets = vec![bucket(
            "work",
            vec![matched(2024, 6, 9, 9, 7), matched(2024, 6, 10, 9, 7)],
        )];

        let weekly = weekly_stats(&buckets);
        let weeks: Vec<_> = weekly[0].weeks.keys().map(|d| d.to_string()).collect();
        assert_eq!(weeks, vec!["2024-06-03", "2024-06-10"]);

        let first = weekly[0].weeks[&NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()];
        assert_eq!(first.total_hours, 7.0);
        assert_eq!(first.avg_hours_per_day, 1.0);
    }

    #[test]
    fn week_key_crosses_year_boundary() {
        // Wednesday 2025-01-01 belongs to the week of Monday 2024-12-30.
        let buckets = vec![bucket("work", vec![matched(2025, 1, 1, 9, 1)])];
        let weekly = weekly_stats(&buckets);
        assert!(weekly[0]
            .weeks
            .contains_key(&NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()));
    }

    #[test]
    fn month_average_uses_real_month_length() {
        // January: 31 days -> 31/7 weeks
        let buckets = vec![bucket("work", vec![matched(2024, 1, 10, 9, 31)])];
        let monthly = monthly_stats(&buckets);
        let jan = monthly[0].months[&(2024, 1)];
        assert_eq!(jan.event_count, 1);
        assert_eq!(jan.total_hours, 31.0);
        assert!((jan.avg_hours_per_week - 7.0).abs() < 1e-9);
    }

    #[test]
    fn december_rolls_over_to_next_year() {
        let buckets = vec![bucket("work", vec![matched(2024, 12, 15, 9, 31)])];
        let monthly = monthly_stats(&buckets);
        let dec = monthly[0].months[&(2024, 12)];
        // December has 31 days
        assert!((dec.avg_hours_per_week - 7.0).abs() < 1e-9);
    }

    #[test]
    fn leap_february_has_29_days() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn daily_series_aligns_with_range_days() {
        let days = vec![
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        ];
        let buckets = vec![bucket(
            "work",
            vec![
                matched(2024, 6, 3, 9, 2),
                matched(2024, 6, 3, 14, 1),
                matched(2024, 6, 5, 9, 4),
            ],
        )];

        let series = daily_hours(&buckets, &days);
        assert_eq!(series[0].hours, vec![Some(3.0), None, Some(4.0)]);
    }

    #[test]
    fn all_day_events_count_but_add_no_hours() {
        let start: chrono::DateTime<Tz> =
            Los_Angeles.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        let buckets = vec![bucket(
            "travel",
            vec![MatchedEvent {
                start,
                summary: "trip".into(),
                duration: Duration::zero(),
            }],
        )];

        let dist = day_of_week_stats(&buckets);
        assert_eq!(dist[0].days[0].count, 1);
        assert_eq!(dist[0].days[0].total_hours, 0.0);

        let days = vec![NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()];
        let series = daily_hours(&buckets, &days);
        // zero-hour day stays an empty cell
        assert_eq!(series[0].hours, vec![None]);
    }
}
