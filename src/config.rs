//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.ipc-sweep.toml` files.

use crate::analysis::DEFAULT_NEAR_BEST_FRACTION;
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".ipc-sweep.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Chart settings.
    #[serde(default)]
    pub plot: PlotConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory containing result files.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

/// Result file discovery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Ignore dot-files.
    #[serde(default)]
    pub skip_hidden: bool,
}

/// Chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Figure title.
    #[serde(default)]
    pub title: Option<String>,

    /// Figure width in pixels.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Figure height in pixels.
    #[serde(default = "default_height")]
    pub height: usize,

    /// Open the interactive chart.
    #[serde(default = "default_true")]
    pub show: bool,

    /// Standalone HTML output path.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: default_width(),
            height: default_height(),
            show: true,
            output: None,
        }
    }
}

fn default_width() -> usize {
    1500
}

fn default_height() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Fraction of the best IPC that counts as near-best.
    #[serde(default = "default_near_best_fraction")]
    pub near_best_fraction: f64,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            near_best_fraction: default_near_best_fraction(),
            format: OutputFormat::default(),
        }
    }
}

fn default_near_best_fraction() -> f64 {
    DEFAULT_NEAR_BEST_FRACTION
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Look for the default config file inside `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let default_path = dir.join(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(&default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values the type system can't.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.report.near_best_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            anyhow::bail!("report.near_best_fraction must be in (0, 1], got {}", fraction);
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            anyhow::bail!("plot.width and plot.height must be positive");
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.results_dir {
            self.general.results_dir = dir.clone();
        }

        if args.skip_hidden {
            self.scanner.skip_hidden = true;
        }

        if args.output.is_some() {
            self.plot.output = args.output.clone();
        }
        if args.no_show {
            self.plot.show = false;
        }

        if let Some(fraction) = args.near_best {
            self.report.near_best_fraction = fraction;
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
