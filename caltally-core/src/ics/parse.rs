//! ICS parsing using the icalendar crate's parser.

use std::path::Path;

use crate::error::{TallyError, TallyResult};
use crate::event::{Event, EventTime};
use chrono::Duration;
use icalendar::{
    parser::{read_calendar, unfold},
    DatePerhapsTime,
};

/// Parse ICS content into the events it contains.
///
/// The container may hold any number of VEVENTs; other components
/// (VTIMEZONE, VTODO, ...) are ignored. A VEVENT without a DTSTART is
/// skipped rather than failing the whole file.
pub fn parse_events(content: &str) -> TallyResult<Vec<Event>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| TallyError::IcsParse(e.to_string()))?;

    let mut events = Vec::new();

    for component in &calendar.components {
        if component.name != "VEVENT" {
            continue;
        }

        let start = match component
            .find_prop("DTSTART")
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
            .map(to_event_time)
        {
            Some(start) => start,
            None => {
                tracing::debug!("skipping VEVENT without a parseable DTSTART");
                continue;
            }
        };

        let end = component
            .find_prop("DTEND")
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
            .map(to_event_time)
            .unwrap_or_else(|| default_end(&start));

        let uid = component.find_prop("UID").map(|p| p.val.to_string());
        let summary = component
            .find_prop("SUMMARY")
            .map(|p| p.val.to_string())
            .unwrap_or_default();
        let description = component.find_prop("DESCRIPTION").map(|p| p.val.to_string());
        let location = component.find_prop("LOCATION").map(|p| p.val.to_string());

        events.push(Event {
            uid,
            summary,
            description,
            location,
            start,
            end,
        });
    }

    Ok(events)
}

/// Read a calendar file and return all its events.
pub fn load_events(path: &Path) -> TallyResult<Vec<Event>> {
    let content = std::fs::read_to_string(path)?;
    let events = parse_events(&content)
        .map_err(|e| TallyError::IcsParse(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), count = events.len(), "loaded calendar");
    Ok(events)
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            icalendar::CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, tzid } => {
                EventTime::DateTimeZoned {
                    datetime: date_time,
                    tzid,
                }
            }
        },
    }
}

/// End time for events that omit DTEND: one hour after a timed start,
/// the next day for an all-day start.
fn default_end(start: &EventTime) -> EventTime {
    match start {
        EventTime::Date(d) => EventTime::Date(*d + Duration::days(1)),
        EventTime::DateTimeUtc(dt) => EventTime::DateTimeUtc(*dt + Duration::hours(1)),
        EventTime::DateTimeFloating(dt) => EventTime::DateTimeFloating(*dt + Duration::hours(1)),
        EventTime::DateTimeZoned { datetime, tzid } => EventTime::DateTimeZoned {
            datetime: *datetime + Duration::hours(1),
            tzid: tzid.clone(),
        },
    }
}
