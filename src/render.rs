//! Terminal rendering of analysis results.

use caltally_core::classify::MatchedEvent;
use caltally_core::stats::{
    self, PatternDayDistribution, PatternMonthlyStats, PatternWeeklyStats, WEEKDAYS,
};
use chrono::Duration;
use owo_colors::OwoColorize;

/// List the events no pattern claimed, so the user can extend the file.
pub fn unmatched(events: &[MatchedEvent]) {
    if events.is_empty() {
        return;
    }
    println!("\n{}", "Events that did not fit the patterns:".bold());
    for event in events {
        println!(
            "  {} | {} | {:.1}h",
            event.start.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            event.summary,
            stats::hours(event.duration)
        );
    }
}

pub fn day_of_week(distribution: &[PatternDayDistribution]) {
    println!("\n{}", "Event distribution by day".bold());
    for pattern in distribution {
        println!("\n{}:", pattern.name.bold());
        for (day, stats) in WEEKDAYS.iter().zip(pattern.days.iter()) {
            println!(
                "  {:<10} {} events, {:.1} hours, {:.1} hours/event",
                day, stats.count, stats.total_hours, stats.avg_hours
            );
        }
    }
}

pub fn total_time(totals: &[(String, Duration)]) {
    println!("\n{}", "Time spent per pattern".bold());
    for (name, duration) in totals {
        println!("  {}: {:.1} hours", name, stats::hours(*duration));
    }
}

pub fn weekly(weekly: &[PatternWeeklyStats]) {
    println!("\n{}", "Weekly statistics".bold());
    for pattern in weekly {
        println!("\n{}:", pattern.name.bold());
        for (monday, stats) in &pattern.weeks {
            println!(
                "  Week of {}: {:.1} hours, {:.1} hours/day",
                monday, stats.total_hours, stats.avg_hours_per_day
            );
        }
    }
}

pub fn monthly(monthly: &[PatternMonthlyStats]) {
    println!("\n{}", "Monthly statistics".bold());
    for pattern in monthly {
        println!("\n{}:", pattern.name.bold());
        for ((year, month), stats) in &pattern.months {
            println!(
                "  {}-{:02}: {:.1} hours, {:.1} hours/week, {} events",
                year, month, stats.total_hours, stats.avg_hours_per_week, stats.event_count
            );
        }
    }
}
