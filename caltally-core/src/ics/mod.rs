//! ICS file ingestion.
//!
//! Reads VEVENT entries out of iCalendar containers according to RFC 5545.

mod parse;

pub use parse::{load_events, parse_events};
