//! Provider-neutral event types and time normalization.
//!
//! Every statistic in this crate operates on events whose times have been
//! resolved into a single reporting timezone. The four `EventTime` shapes
//! cover everything the iCalendar format can produce: all-day dates, UTC
//! timestamps, floating timestamps, and TZID-qualified local timestamps.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A calendar event, reduced to the fields that matter for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub uid: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// An event start or end time, as recorded in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    /// All-day event boundary (`DTSTART;VALUE=DATE`)
    Date(NaiveDate),
    /// UTC timestamp (`...Z`)
    DateTimeUtc(DateTime<Utc>),
    /// Floating timestamp with no zone information
    DateTimeFloating(NaiveDateTime),
    /// Local timestamp qualified with a TZID parameter
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventTime {
    /// True for all-day boundaries.
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// Resolve this time to an instant in the reporting timezone.
    ///
    /// Floating timestamps are interpreted as UTC. A TZID naming an unknown
    /// zone falls back to the floating rule.
    pub fn resolve(&self, tz: Tz) -> DateTime<Tz> {
        match self {
            EventTime::Date(d) => local_instant(tz, d.and_time(NaiveTime::MIN)),
            EventTime::DateTimeUtc(dt) => dt.with_timezone(&tz),
            EventTime::DateTimeFloating(dt) => Utc.from_utc_datetime(dt).with_timezone(&tz),
            EventTime::DateTimeZoned { datetime, tzid } => match tzid.parse::<Tz>() {
                Ok(src) => local_instant(src, *datetime).with_timezone(&tz),
                Err(_) => {
                    tracing::debug!(tzid = %tzid, "unknown TZID, treating timestamp as UTC");
                    Utc.from_utc_datetime(datetime).with_timezone(&tz)
                }
            },
        }
    }

    /// Resolve to UTC (used for duration arithmetic).
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.resolve(chrono_tz::UTC).with_timezone(&Utc)
    }
}

/// Interpret a naive local time in `tz`, taking the earliest valid instant
/// when the local time is ambiguous or skipped by a DST transition.
fn local_instant(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

impl Event {
    /// Time this event contributes to statistics.
    ///
    /// All-day events are counted as occurrences but carry zero duration;
    /// timed events contribute `end - start`, clamped to zero for spans
    /// that come out negative.
    pub fn duration(&self) -> Duration {
        if self.start.is_all_day() {
            return Duration::zero();
        }
        (self.end.to_utc() - self.start.to_utc()).max(Duration::zero())
    }

    /// Text the patterns are matched against: summary, description and
    /// location joined with single spaces, empty fields included.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.summary,
            self.description.as_deref().unwrap_or(""),
            self.location.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Los_Angeles;

    fn timed(start: (i32, u32, u32, u32, u32), hours: i64) -> Event {
        let (y, m, d, h, min) = start;
        let start = Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap();
        Event {
            uid: None,
            summary: "test".into(),
            description: None,
            location: None,
            start: EventTime::DateTimeUtc(start),
            end: EventTime::DateTimeUtc(start + Duration::hours(hours)),
        }
    }

    #[test]
    fn utc_time_converts_to_reporting_zone() {
        let t = EventTime::DateTimeUtc(Utc.with_ymd_and_hms(2024, 6, 1, 17, 0, 0).unwrap());
        let resolved = t.resolve(Los_Angeles);
        // PDT is UTC-7 in June
        assert_eq!(resolved.format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 10:00");
    }

    #[test]
    fn floating_time_is_treated_as_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let t = EventTime::DateTimeFloating(naive);
        // PST is UTC-8 in January
        assert_eq!(
            t.resolve(Los_Angeles).format("%H:%M").to_string(),
            "04:00"
        );
    }

    #[test]
    fn zoned_time_honors_tzid() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let t = EventTime::DateTimeZoned {
            datetime: naive,
            tzid: "America/New_York".into(),
        };
        // 10:00 Eastern = 07:00 Pacific
        assert_eq!(t.resolve(Los_Angeles).format("%H:%M").to_string(), "07:00");
    }

    #[test]
    fn unknown_tzid_falls_back_to_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let t = EventTime::DateTimeZoned {
            datetime: naive,
            tzid: "Not/AZone".into(),
        };
        assert_eq!(t.resolve(chrono_tz::UTC).format("%H:%M").to_string(), "10:00");
    }

    #[test]
    fn all_day_resolves_to_local_midnight() {
        let t = EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let resolved = t.resolve(Los_Angeles);
        assert_eq!(resolved.format("%Y-%m-%d %H:%M").to_string(), "2024-03-10 00:00");
    }

    #[test]
    fn timed_event_duration() {
        assert_eq!(timed((2024, 6, 1, 9, 0), 2).duration(), Duration::hours(2));
    }

    #[test]
    fn all_day_event_has_zero_duration() {
        let event = Event {
            uid: None,
            summary: "holiday".into(),
            description: None,
            location: None,
            start: EventTime::Date(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()),
            end: EventTime::Date(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()),
        };
        assert_eq!(event.duration(), Duration::zero());
    }

    #[test]
    fn negative_span_clamps_to_zero() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let event = Event {
            uid: None,
            summary: "broken".into(),
            description: None,
            location: None,
            start: EventTime::DateTimeUtc(start),
            end: EventTime::DateTimeUtc(start - Duration::hours(1)),
        };
        assert_eq!(event.duration(), Duration::zero());
    }

    #[test]
    fn searchable_text_joins_all_fields() {
        let mut event = timed((2024, 6, 1, 9, 0), 1);
        event.summary = "Standup".into();
        event.description = Some("daily sync".into());
        event.location = Some("Room 4".into());
        assert_eq!(event.searchable_text(), "Standup daily sync Room 4");

        event.description = None;
        event.location = None;
        assert_eq!(event.searchable_text(), "Standup  ");
    }
}
