//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dedup",
    version,
    about = "Find records of a small contact list that already exist in a master list",
    long_about = "Compare an incoming contact list against a master customer list.\n\n\
                  Each record is matched by email, then fuzzy name, then fuzzy address\n\
                  behind a country/zip/state and house-number gate. Duplicates and\n\
                  non-duplicates are written as separate CSV files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow names, emails and addresses to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify the small list against the master list and write the results.
    Run(RunArgs),

    /// Print the field layout of both datasets.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Master customer list (CSV with a header row).
    #[arg(long = "master", value_name = "CSV")]
    pub master: PathBuf,

    /// Incoming list to check for duplicates (CSV with a header row).
    #[arg(long = "small", value_name = "CSV")]
    pub small: PathBuf,

    /// Output directory (default: <SMALL directory>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Similarity threshold in (0, 1] for name and address matching.
    ///
    /// Invalid values fall back to 0.85 with a warning.
    #[arg(long = "threshold", value_name = "VALUE")]
    pub threshold: Option<String>,

    /// TOML file with schemas and options (default: $DEDUP_CONFIG).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Update progress every N small records (0 disables).
    #[arg(long = "progress-interval", value_name = "N")]
    pub progress_interval: Option<usize>,

    /// Skip the JSON match report.
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Classify and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// TOML file with schemas (default: $DEDUP_CONFIG).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
