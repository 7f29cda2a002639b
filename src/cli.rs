//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// ipc-sweep - plot IPC-vs-parameter sweeps from simulation results
///
/// Reads every result file in a directory, averages IPC per value of each
/// configuration parameter, and draws one panel per parameter with one
/// line per file.
///
/// Examples:
///   ipc-sweep
///   ipc-sweep --results-dir runs/ --output sweep.html --no-show
///   ipc-sweep --report summary.md
///   ipc-sweep --report summary.json --format json --near-best 0.95
///   ipc-sweep --dry-run
///   ipc-sweep --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing the result files
    ///
    /// Defaults to `results` (or the value in the config file).
    #[arg(short = 'd', long, value_name = "DIR", env = "IPC_SWEEP_RESULTS")]
    pub results_dir: Option<PathBuf>,

    /// Write the chart to a standalone HTML file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not open the interactive chart
    #[arg(long)]
    pub no_show: bool,

    /// Write a sweep summary report to this file
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Report format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Fraction of the best IPC a configuration must reach to be near-best
    ///
    /// The report picks the near-best configuration with the fewest
    /// functional units. Must be in (0, 1].
    #[arg(long, value_name = "FRACTION")]
    pub near_best: Option<f64>,

    /// Ignore files whose names start with a dot
    #[arg(long)]
    pub skip_hidden: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .ipc-sweep.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: list result files and record counts without plotting
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .ipc-sweep.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(fraction) = self.near_best {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err("Near-best fraction must be in (0, 1]".to_string());
            }
        }

        if self.format.is_some() && self.report.is_none() {
            return Err("--format requires --report".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
