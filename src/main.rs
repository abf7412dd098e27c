mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "caltally")]
#[command(about = "Analyze .ics calendars: match events against patterns and tally time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match calendar events against patterns and report time statistics
    Analyze {
        /// Paths to .ics calendar files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// First day of the analysis range (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day of the analysis range (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Patterns file (defaults to patterns_file from config)
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Output spreadsheet path (defaults to output from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reporting timezone (IANA name, defaults to timezone from config)
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Seed a patterns file from the keywords found in the calendars
    Patterns {
        /// Paths to .ics calendar files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Patterns file to write (defaults to patterns_file from config)
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Overwrite an existing patterns file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            files,
            from,
            to,
            patterns,
            output,
            timezone,
        } => commands::analyze::run(files, &from, &to, patterns, output, timezone),
        Commands::Patterns {
            files,
            patterns,
            force,
        } => commands::patterns::run(files, patterns, force),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();
}
