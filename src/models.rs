//! Data models for simulation sweep results.
//!
//! This module contains the core data structures used throughout
//! the application for representing records, result sets, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of configuration parameters in a record.
pub const CONFIG_FIELDS: usize = 6;

/// One of the swept hardware configuration parameters.
///
/// Variants are declared in the column order of the result files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Number of ALU functional units
    Alus,
    /// Number of multiplier functional units
    Muls,
    /// Number of load/store functional units
    Lsus,
    /// Scheduling queue entries per functional unit
    StationsPerFu,
    /// Number of physical registers
    Pregs,
    /// Instructions fetched per cycle
    FetchWidth,
}

impl Dimension {
    /// All dimensions, in file column order.
    pub const ALL: [Dimension; CONFIG_FIELDS] = [
        Dimension::Alus,
        Dimension::Muls,
        Dimension::Lsus,
        Dimension::StationsPerFu,
        Dimension::Pregs,
        Dimension::FetchWidth,
    ];

    /// Column index of this dimension within a record.
    pub fn index(&self) -> usize {
        match self {
            Dimension::Alus => 0,
            Dimension::Muls => 1,
            Dimension::Lsus => 2,
            Dimension::StationsPerFu => 3,
            Dimension::Pregs => 4,
            Dimension::FetchWidth => 5,
        }
    }

    /// Human-readable axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Alus => "ALUs",
            Dimension::Muls => "MULs",
            Dimension::Lsus => "LSUs",
            Dimension::StationsPerFu => "Stations per FU",
            Dimension::Pregs => "Pregs",
            Dimension::FetchWidth => "Fetch Width",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single simulation result: a hardware configuration and its measured IPC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Configuration values, indexed by [`Dimension::index`].
    pub config: [f64; CONFIG_FIELDS],
    /// Average instructions per cycle.
    pub ipc: f64,
}

impl Record {
    pub fn new(config: [f64; CONFIG_FIELDS], ipc: f64) -> Self {
        Self { config, ipc }
    }

    /// Returns the value of one configuration dimension.
    pub fn value(&self, dimension: Dimension) -> f64 {
        self.config[dimension.index()]
    }

    /// Total functional units (ALUs + MULs + LSUs).
    pub fn functional_units(&self) -> f64 {
        self.value(Dimension::Alus) + self.value(Dimension::Muls) + self.value(Dimension::Lsus)
    }

    /// Returns the configuration formatted as `ALUs=2, MULs=1, ...`.
    pub fn config_label(&self) -> String {
        Dimension::ALL
            .iter()
            .map(|d| format!("{}={}", d.label(), self.value(*d)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// All records parsed from one result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// File name the records came from (used as the legend label).
    pub name: String,
    /// Parsed records.
    pub records: Vec<Record>,
}

impl ResultSet {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Mean IPC over all records sharing one distinct dimension value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    /// Distinct parameter value.
    pub value: f64,
    /// Arithmetic mean of IPC across matching records.
    pub mean_ipc: f64,
    /// Number of records sharing the value.
    pub count: usize,
}

/// Aggregate points for one dimension, ordered by ascending value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSeries {
    pub dimension: Dimension,
    pub points: Vec<AggregatePoint>,
}

impl DimensionSeries {
    /// Returns x and y coordinates for plotting.
    pub fn coordinates(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.value, p.mean_ipc)).unzip()
    }
}

/// Summary statistics for one result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Source file name.
    pub name: String,
    /// Number of records in the file.
    pub record_count: usize,
    /// Highest-IPC record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<Record>,
    /// Near-best record with the fewest functional units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_frugal: Option<Record>,
    /// Per-dimension mean IPC.
    pub series: Vec<DimensionSeries>,
}

/// Metadata about a sweep report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Directory the results were read from.
    pub results_dir: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of result files.
    pub files: usize,
    /// Total number of records across all files.
    pub total_records: usize,
    /// Fraction of the best IPC a record must reach to count as near-best.
    pub near_best_fraction: f64,
}

/// The complete sweep report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summaries: Vec<SweepSummary>,
}
