pub mod analyze;
pub mod patterns;

use std::path::PathBuf;

use anyhow::Result;
use caltally_core::event::Event;
use caltally_core::ics;

/// Read every input calendar and concatenate their events, in file order.
pub fn load_all(files: &[PathBuf]) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for file in files {
        let mut batch = ics::load_events(file)?;
        events.append(&mut batch);
    }
    tracing::debug!(files = files.len(), events = events.len(), "loaded calendars");
    Ok(events)
}
