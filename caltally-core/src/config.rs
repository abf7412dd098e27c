//! Global caltally configuration.

use std::path::PathBuf;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{TallyError, TallyResult};

static DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
static DEFAULT_PATTERNS_FILE: &str = "patterns.txt";
static DEFAULT_OUTPUT: &str = "calendar_analysis.xlsx";

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_patterns_file() -> PathBuf {
    PathBuf::from(DEFAULT_PATTERNS_FILE)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// Global configuration at ~/.config/caltally/config.toml
///
/// Every field has a default, and every field can be overridden per-run
/// with a CLI flag.
#[derive(Deserialize, Clone)]
pub struct GlobalConfig {
    /// IANA name of the reporting timezone
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_patterns_file")]
    pub patterns_file: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            timezone: default_timezone(),
            patterns_file: default_patterns_file(),
            output: default_output(),
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> TallyResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TallyError::Config("Could not determine config directory".into()))?
            .join("caltally");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, falling back to defaults when no file exists.
    pub fn load() -> TallyResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| TallyError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the configured timezone name.
    pub fn resolve_timezone(&self) -> TallyResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| TallyError::Timezone(self.timezone.clone()))
    }
}
