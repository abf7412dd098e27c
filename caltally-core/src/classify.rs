//! Event classification against a pattern set.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::event::Event;
use crate::pattern::PatternSet;
use crate::range::AnalysisRange;

/// An event that landed in a pattern bucket, with its times already
/// resolved into the reporting timezone.
#[derive(Debug, Clone)]
pub struct MatchedEvent {
    pub start: DateTime<Tz>,
    pub summary: String,
    pub duration: Duration,
}

/// All events that matched one pattern.
#[derive(Debug, Clone)]
pub struct PatternBucket {
    pub name: String,
    pub events: Vec<MatchedEvent>,
}

/// The result of classifying a set of events.
///
/// Buckets appear in pattern-set order. An event may sit in several
/// buckets (it is counted once per pattern it matches); events matching
/// nothing land in `unmatched`.
#[derive(Debug, Clone)]
pub struct Classification {
    pub buckets: Vec<PatternBucket>,
    pub unmatched: Vec<MatchedEvent>,
}

/// Classify `events` against `patterns`, keeping only events that overlap
/// the analysis range.
pub fn classify(events: &[Event], patterns: &PatternSet, range: &AnalysisRange) -> Classification {
    let mut buckets: Vec<PatternBucket> = patterns
        .iter()
        .map(|p| PatternBucket {
            name: p.name.clone(),
            events: Vec::new(),
        })
        .collect();
    let mut unmatched = Vec::new();

    for event in events {
        let start = event.start.resolve(range.tz);
        let end = event.end.resolve(range.tz);

        if !range.overlaps(&start, &end) {
            continue;
        }

        let matched = MatchedEvent {
            start,
            summary: event.summary.clone(),
            duration: event.duration(),
        };

        let text = event.searchable_text();
        let mut hit = false;
        for (pattern, bucket) in patterns.iter().zip(buckets.iter_mut()) {
            if pattern.regex.is_match(&text) {
                bucket.events.push(matched.clone());
                hit = true;
            }
        }

        if !hit {
            unmatched.push(matched);
        }
    }

    Classification { buckets, unmatched }
}
