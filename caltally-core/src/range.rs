//! Analysis date range in the reporting timezone.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{TallyError, TallyResult};

/// Closed date range all statistics are computed over.
///
/// `start` is the first day at 00:00:00 and `end` the last day at 23:59:59,
/// both in the reporting timezone.
#[derive(Debug, Clone)]
pub struct AnalysisRange {
    pub tz: Tz,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl AnalysisRange {
    /// Build a range from `YYYY-MM-DD` boundary strings.
    pub fn from_args(from: &str, to: &str, tz: Tz) -> TallyResult<Self> {
        let first_day = parse_day(from)?;
        let last_day = parse_day(to)?;

        if first_day > last_day {
            return Err(TallyError::InvalidRange(format!(
                "start {} is after end {}",
                first_day, last_day
            )));
        }

        let start = local_instant(tz, first_day, NaiveTime::MIN);
        let end = local_instant(
            tz,
            last_day,
            NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
        );

        Ok(AnalysisRange {
            tz,
            start,
            end,
            first_day,
            last_day,
        })
    }

    /// An event overlaps the range when any part of its span falls inside.
    pub fn overlaps(&self, event_start: &DateTime<Tz>, event_end: &DateTime<Tz>) -> bool {
        *event_end >= self.start && *event_start <= self.end
    }

    /// Every calendar day in the range, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut day = self.first_day;
        while day <= self.last_day {
            days.push(day);
            day += Duration::days(1);
        }
        days
    }
}

fn parse_day(s: &str) -> TallyResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        TallyError::InvalidRange(format!("invalid date '{}'. Expected YYYY-MM-DD", s))
    })
}

/// Earliest valid instant for a local wall-clock time (DST gaps resolve
/// forward rather than failing).
fn local_instant(tz: Tz, day: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = day.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}
