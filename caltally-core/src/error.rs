//! Error types for caltally.

use thiserror::Error;

/// Errors that can occur while analyzing calendars.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Invalid pattern '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Unknown timezone: {0}")]
    Timezone(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for caltally operations.
pub type TallyResult<T> = Result<T, TallyError>;
