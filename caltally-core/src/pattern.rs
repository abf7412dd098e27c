//! Named pattern sets used to classify events.
//!
//! Patterns live in a plain-text file, one `name: regex` entry per line.
//! Matching is case-insensitive. When no file exists yet, a starter set
//! can be seeded from the keywords found in the calendars themselves.

use std::path::Path;

use regex::{Regex, RegexBuilder};

use crate::error::{TallyError, TallyResult};
use crate::event::Event;

/// A named, case-insensitive regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: String,
    pub regex: Regex,
}

/// An ordered set of patterns. File order is preserved so that reports
/// list patterns the way the user wrote them.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Parse patterns file content.
    ///
    /// Blank lines, `#` comments and lines without a `:` separator are
    /// skipped. A later entry with the same name replaces an earlier one.
    pub fn parse(content: &str) -> TallyResult<Self> {
        let mut patterns: Vec<Pattern> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, raw)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let raw = raw.trim();

            let regex = RegexBuilder::new(raw)
                .case_insensitive(true)
                .build()
                .map_err(|source| TallyError::Pattern {
                    name: name.to_string(),
                    source,
                })?;

            let pattern = Pattern {
                name: name.to_string(),
                regex,
            };
            match patterns.iter_mut().find(|p| p.name == pattern.name) {
                Some(existing) => *existing = pattern,
                None => patterns.push(pattern),
            }
        }

        Ok(PatternSet { patterns })
    }

    /// Load patterns from a file.
    pub fn load(path: &Path) -> TallyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), count = set.len(), "loaded patterns");
        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Build starter patterns file content from the keywords found in events.
///
/// Every distinct word of three or more alphanumeric characters from the
/// searchable text becomes a `word:(?i)word` line, lowercased and sorted.
/// The user is expected to prune this file down to the patterns they
/// actually care about.
pub fn seed_content(events: &[Event]) -> String {
    // Latin and Cyrillic letters plus digits
    let word = Regex::new(r"[A-Za-zА-Яа-я0-9]{3,}").expect("static regex");

    let mut keywords: Vec<String> = events
        .iter()
        .flat_map(|event| {
            let text = event.searchable_text();
            word.find_iter(&text)
                .map(|m| m.as_str().to_lowercase())
                .collect::<Vec<_>>()
        })
        .collect();
    keywords.sort();
    keywords.dedup();

    let mut out = String::new();
    for word in keywords {
        out.push_str(&format!("{word}:(?i){word}\n"));
    }
    out
}
