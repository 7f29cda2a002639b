//! ipc-sweep - IPC sweep plotter for processor simulation results
//!
//! Reads a directory of result files (3-line records of configuration,
//! IPC, and an unused line), averages IPC per value of each of the six
//! configuration parameters, and charts one panel per parameter with one
//! line per result file.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (missing directory, malformed result file, I/O)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod plot;
mod report;
mod scanner;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::{Report, ReportMetadata, ResultSet};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("ipc-sweep v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .ipc-sweep.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the results directory, chart size, and report.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, aggregate, and render.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let scanner = scanner::FileScanner::new(
        config.general.results_dir.clone(),
        scanner::ScanConfig::from(&config.scanner),
    );

    if args.dry_run {
        return handle_dry_run(&scanner);
    }

    // Step 1: Load
    if !args.quiet {
        println!(
            "📂 Loading results from {}",
            config.general.results_dir.display()
        );
    }
    let mut sets = loader::load_all(&scanner, !args.quiet)?;

    // Step 2: Sort
    analysis::sort_all(&mut sets);
    let total = analysis::total_records(&sets);
    info!("Loaded {} records from {} files", total, sets.len());
    if sets.is_empty() {
        warn!("No result files found; the chart will be empty");
    }
    for set in sets.iter().filter(|s| s.is_empty()) {
        warn!("{} contains no records", set.name);
    }

    // Step 3: Report
    if let Some(ref report_path) = args.report {
        write_report(&sets, &config, report_path)?;
    }

    // Step 4: Plot
    let figure = plot::build_figure(
        &sets,
        config.plot.title.clone(),
        config.plot.width,
        config.plot.height,
    );
    let chart = plot::to_plotly(&figure);

    if let Some(ref output) = config.plot.output {
        let page_title = config.plot.title.as_deref().unwrap_or("IPC sweep");
        plot::write_html(&chart, page_title, output)?;
        if !args.quiet {
            println!("🖼  Chart saved to: {}", output.display());
        }
    }

    if config.plot.show {
        plot::show(&chart);
    } else {
        debug!("Interactive chart disabled");
    }

    if !args.quiet {
        println!("\n📊 Sweep Summary:");
        println!("   Result files: {}", sets.len());
        println!("   Records: {}", total);
        for set in &sets {
            if let Some(best) = analysis::best_record(&set.records) {
                println!("   - {}: best IPC {:.3} ({})", set.name, best.ipc, best.config_label());
            }
        }
    }

    Ok(())
}

/// Build the summary report and write it in the configured format.
fn write_report(sets: &[ResultSet], config: &Config, path: &Path) -> Result<()> {
    let fraction = config.report.near_best_fraction;

    let report = Report {
        metadata: ReportMetadata {
            results_dir: config.general.results_dir.display().to_string(),
            generated_at: Utc::now(),
            files: sets.len(),
            total_records: analysis::total_records(sets),
            near_best_fraction: fraction,
        },
        summaries: sets
            .iter()
            .map(|set| analysis::summarize(set, fraction))
            .collect(),
    };

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(path, &output)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!("Report written to {}", path.display());

    Ok(())
}

/// Handle --dry-run: list result files and record counts, exit.
fn handle_dry_run(scanner: &scanner::FileScanner) -> Result<()> {
    println!("\n🔍 Dry run: scanning {}...\n", scanner.results_dir().display());

    let files = scanner.scan()?;

    if files.is_empty() {
        println!("   No result files found.");
    } else {
        println!("   Found {} result files:\n", files.len());
        for file in &files {
            let set = loader::load_file(file)?;
            println!(
                "     📄 {} ({} bytes, {} records)",
                file.name,
                file.size,
                set.len()
            );
        }
    }

    println!("\n✅ Dry run complete. Nothing was plotted.");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location; a present but invalid file is an error
    match Config::load_default()? {
        Some(config) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
