use std::path::PathBuf;

use anyhow::Result;
use caltally_core::config::GlobalConfig;
use caltally_core::pattern;

pub fn run(files: Vec<PathBuf>, patterns: Option<PathBuf>, force: bool) -> Result<()> {
    let config = GlobalConfig::load()?;
    let path = patterns.unwrap_or(config.patterns_file);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let events = super::load_all(&files)?;
    let content = pattern::seed_content(&events);
    std::fs::write(&path, &content)?;

    println!(
        "Wrote {} keyword patterns to {}",
        content.lines().count(),
        path.display()
    );
    println!("Edit it down to the patterns you care about.");

    Ok(())
}
