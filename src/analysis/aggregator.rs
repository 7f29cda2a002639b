//! Sorting and per-dimension aggregation of result sets.
//!
//! This module orders records by IPC, groups them by each
//! configuration dimension, and computes summary picks.

use crate::models::{AggregatePoint, Dimension, DimensionSeries, Record, ResultSet, SweepSummary};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Default fraction of the best IPC a record must reach to be near-best.
pub const DEFAULT_NEAR_BEST_FRACTION: f64 = 0.9;

/// Sort records by IPC (highest first).
///
/// The sort is stable, so records with equal IPC keep their file order.
pub fn sort_by_ipc(records: &mut [Record]) {
    records.sort_by(|a, b| b.ipc.total_cmp(&a.ipc));
}

/// Sort every result set in place.
pub fn sort_all(sets: &mut [ResultSet]) {
    for set in sets.iter_mut() {
        sort_by_ipc(&mut set.records);
    }
}

/// Mean IPC per distinct value of one dimension, ordered by value.
pub fn mean_by_dimension(records: &[Record], dimension: Dimension) -> DimensionSeries {
    let mut groups: BTreeMap<OrderedFloat<f64>, (f64, usize)> = BTreeMap::new();

    for record in records {
        let entry = groups
            .entry(OrderedFloat(record.value(dimension)))
            .or_insert((0.0, 0));
        entry.0 += record.ipc;
        entry.1 += 1;
    }

    let points = groups
        .into_iter()
        .map(|(value, (sum, count))| AggregatePoint {
            value: value.into_inner(),
            mean_ipc: sum / count as f64,
            count,
        })
        .collect();

    DimensionSeries { dimension, points }
}

/// Aggregate a result set along every dimension, in dimension order.
pub fn aggregate(set: &ResultSet) -> Vec<DimensionSeries> {
    Dimension::ALL
        .iter()
        .map(|&dimension| mean_by_dimension(&set.records, dimension))
        .collect()
}

/// Highest-IPC record of a set.
pub fn best_record(records: &[Record]) -> Option<Record> {
    records
        .iter()
        .copied()
        .reduce(|best, r| if r.ipc > best.ipc { r } else { best })
}

/// Record with the fewest functional units among those within `fraction`
/// of the best IPC. Ties go to the higher-IPC record.
pub fn most_frugal(records: &[Record], fraction: f64) -> Option<Record> {
    let best = best_record(records)?;
    let threshold = fraction * best.ipc;

    records
        .iter()
        .copied()
        .filter(|r| r.ipc >= threshold)
        .reduce(|pick, r| {
            let fewer_units = r.functional_units() < pick.functional_units();
            let same_units_faster =
                r.functional_units() == pick.functional_units() && r.ipc > pick.ipc;
            if fewer_units || same_units_faster {
                r
            } else {
                pick
            }
        })
}

/// Build the summary of one result set.
pub fn summarize(set: &ResultSet, fraction: f64) -> SweepSummary {
    SweepSummary {
        name: set.name.clone(),
        record_count: set.len(),
        best: best_record(&set.records),
        most_frugal: most_frugal(&set.records, fraction),
        series: aggregate(set),
    }
}

/// Total number of records across all sets.
pub fn total_records(sets: &[ResultSet]) -> usize {
    sets.iter().map(ResultSet::len).sum()
}
