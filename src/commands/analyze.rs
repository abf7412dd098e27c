use std::path::PathBuf;

use anyhow::Result;
use caltally_core::classify::classify;
use caltally_core::config::GlobalConfig;
use caltally_core::pattern::{self, PatternSet};
use caltally_core::range::AnalysisRange;
use caltally_core::{report, stats};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use crate::render;

pub fn run(
    files: Vec<PathBuf>,
    from: &str,
    to: &str,
    patterns: Option<PathBuf>,
    output: Option<PathBuf>,
    timezone: Option<String>,
) -> Result<()> {
    let config = GlobalConfig::load()?;

    let tz: Tz = match &timezone {
        Some(name) => name
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown timezone: {}", name))?,
        None => config.resolve_timezone()?,
    };
    let patterns_path = patterns.unwrap_or_else(|| config.patterns_file.clone());
    let output_path = output.unwrap_or_else(|| config.output.clone());

    let range = AnalysisRange::from_args(from, to, tz)?;
    let events = super::load_all(&files)?;

    // No patterns file yet: seed one from the calendars and stop, so the
    // user can edit it down before the first real run.
    if !patterns_path.exists() {
        let content = pattern::seed_content(&events);
        std::fs::write(&patterns_path, &content)?;
        println!(
            "{} not found. Seeded it with {} keywords from your calendars.",
            patterns_path.display(),
            content.lines().count()
        );
        println!("Edit it down to the patterns you care about, then rerun.");
        return Ok(());
    }

    let patterns = PatternSet::load(&patterns_path)?;
    if patterns.is_empty() {
        anyhow::bail!("{} contains no patterns", patterns_path.display());
    }

    let classification = classify(&events, &patterns, &range);

    render::unmatched(&classification.unmatched);
    render::day_of_week(&stats::day_of_week_stats(&classification.buckets));
    render::total_time(&stats::total_time(&classification.buckets));
    render::weekly(&stats::weekly_stats(&classification.buckets));
    render::monthly(&stats::monthly_stats(&classification.buckets));

    let days = range.days();
    let series = stats::daily_hours(&classification.buckets, &days);
    let bytes = report::render_to_bytes(&days, &series)?;
    std::fs::write(&output_path, bytes)?;

    println!("\nReport saved to {}", output_path.display().bold());

    Ok(())
}
