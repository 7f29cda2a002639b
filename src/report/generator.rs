//! Sweep report generation.
//!
//! This module generates Markdown and JSON summaries of the loaded
//! result sets.

use crate::models::{DimensionSeries, Record, Report, ReportMetadata, SweepSummary};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# IPC Sweep Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report));
    output.push_str(&generate_overview_section(&report.summaries));
    output.push_str(&generate_files_section(&report.summaries));
    output.push_str(&generate_footer());

    output
}

fn anchor(name: &str) -> String {
    name.replace(['/', '.', ' '], "-").to_lowercase()
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Results Directory:** `{}`\n", metadata.results_dir));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Result Files:** {}\n", metadata.files));
    section.push_str(&format!("- **Total Records:** {}\n", metadata.total_records));
    section.push_str(&format!(
        "- **Near-best Threshold:** {:.0}% of best IPC\n",
        metadata.near_best_fraction * 100.0
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &Report) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Overview](#overview)\n");
    toc.push_str("- [Result Files](#result-files)\n");

    for summary in &report.summaries {
        toc.push_str(&format!("  - [{}](#{})\n", summary.name, anchor(&summary.name)));
    }

    toc.push('\n');
    toc
}

fn format_ipc(record: Option<&Record>) -> String {
    record
        .map(|r| format!("{:.3}", r.ipc))
        .unwrap_or_else(|| "-".to_string())
}

fn format_config(record: Option<&Record>) -> String {
    record
        .map(Record::config_label)
        .unwrap_or_else(|| "-".to_string())
}

/// Generate the cross-file overview table.
fn generate_overview_section(summaries: &[SweepSummary]) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");

    if summaries.is_empty() {
        section.push_str("No result files were found.\n\n");
        return section;
    }

    section.push_str("| File | Records | Best IPC | Frugal IPC | Frugal FUs |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|\n");

    // Highest best-IPC first
    let mut ranked: Vec<&SweepSummary> = summaries.iter().collect();
    ranked.sort_by(|a, b| {
        let a_ipc = a.best.map(|r| r.ipc).unwrap_or(f64::NEG_INFINITY);
        let b_ipc = b.best.map(|r| r.ipc).unwrap_or(f64::NEG_INFINITY);
        b_ipc.total_cmp(&a_ipc)
    });

    for summary in ranked {
        let frugal_units = summary
            .most_frugal
            .map(|r| r.functional_units().to_string())
            .unwrap_or_else(|| "-".to_string());
        section.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            summary.name,
            summary.record_count,
            format_ipc(summary.best.as_ref()),
            format_ipc(summary.most_frugal.as_ref()),
            frugal_units
        ));
    }
    section.push('\n');

    section
}

/// Generate the per-file sections.
fn generate_files_section(summaries: &[SweepSummary]) -> String {
    let mut section = String::new();

    section.push_str("## Result Files\n\n");

    for summary in summaries {
        section.push_str(&generate_file_section(summary));
    }

    section
}

/// Generate the section for a single result file.
fn generate_file_section(summary: &SweepSummary) -> String {
    let mut section = String::new();

    section.push_str(&format!("### {} {{#{}}}\n\n", summary.name, anchor(&summary.name)));
    section.push_str(&format!("*Records: {}*\n\n", summary.record_count));

    if summary.record_count == 0 {
        section.push_str("This file contains no records.\n\n---\n\n");
        return section;
    }

    section.push_str(&format!(
        "- **Best:** IPC {} with {}\n",
        format_ipc(summary.best.as_ref()),
        format_config(summary.best.as_ref())
    ));
    section.push_str(&format!(
        "- **Most frugal near-best:** IPC {} with {}\n\n",
        format_ipc(summary.most_frugal.as_ref()),
        format_config(summary.most_frugal.as_ref())
    ));

    for series in &summary.series {
        section.push_str(&generate_series_table(series));
    }

    section.push_str("---\n\n");
    section
}

/// Generate a value -> mean IPC table for one dimension.
fn generate_series_table(series: &DimensionSeries) -> String {
    let mut table = String::new();

    table.push_str(&format!("#### {}\n\n", series.dimension));
    table.push_str("| Value | Mean IPC | Records |\n");
    table.push_str("|:---:|:---:|:---:|\n");

    for point in &series.points {
        table.push_str(&format!(
            "| {} | {:.3} | {} |\n",
            point.value, point.mean_ipc, point.count
        ));
    }
    table.push('\n');

    table
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Report generated by ipc-sweep v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
