//! Backend-neutral figure model.
//!
//! A [`Figure`] is always a 3x2 grid with one [`Panel`] per
//! configuration dimension, whatever the number of input files.

use crate::analysis::mean_by_dimension;
use crate::models::{Dimension, ResultSet};

/// Rows in the panel grid.
pub const GRID_ROWS: usize = 3;
/// Columns in the panel grid.
pub const GRID_COLUMNS: usize = 2;

/// Y axis title shared by every panel.
pub const IPC_AXIS_LABEL: &str = "Average IPC";

/// One line on a panel: a result file's mean IPC per parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label (the source file name)
    pub label: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// One subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub dimension: Dimension,
    /// Zero-based row in the grid.
    pub row: usize,
    /// Zero-based column in the grid.
    pub column: usize,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

/// A grid of panels ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub width: usize,
    pub height: usize,
    pub panels: Vec<Panel>,
}

impl Figure {
    /// Distinct series labels, in first-seen order.
    pub fn legend_entries(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for series in self.panels.iter().flat_map(|p| &p.series) {
            if !labels.contains(&series.label.as_str()) {
                labels.push(&series.label);
            }
        }
        labels
    }
}

/// Build the figure for a collection of (sorted) result sets.
pub fn build_figure(sets: &[ResultSet], title: Option<String>, width: usize, height: usize) -> Figure {
    let panels = Dimension::ALL
        .iter()
        .enumerate()
        .map(|(i, &dimension)| Panel {
            dimension,
            row: i / GRID_COLUMNS,
            column: i % GRID_COLUMNS,
            x_label: dimension.label().to_string(),
            y_label: IPC_AXIS_LABEL.to_string(),
            series: sets
                .iter()
                .map(|set| {
                    let (xs, ys) = mean_by_dimension(&set.records, dimension).coordinates();
                    Series {
                        label: set.name.clone(),
                        xs,
                        ys,
                    }
                })
                .collect(),
        })
        .collect();

    Figure {
        title,
        width,
        height,
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sort_all;
    use crate::loader::parse_records;
    use crate::models::Record;

    fn two_record_set(name: &str) -> ResultSet {
        ResultSet::new(
            name,
            vec![
                Record::new([1.0; 6], 2.0),
                Record::new([1.0; 6], 4.0),
            ],
        )
    }

    #[test]
    fn test_empty_input_still_has_six_panels() {
        let figure = build_figure(&[], None, 1500, 1000);

        assert_eq!(figure.panels.len(), GRID_ROWS * GRID_COLUMNS);
        assert!(figure.panels.iter().all(|p| p.series.is_empty()));
        assert!(figure.legend_entries().is_empty());
    }

    #[test]
    fn test_panel_layout_is_row_major() {
        let figure = build_figure(&[two_record_set("a.txt")], None, 1500, 1000);

        let positions: Vec<(usize, usize)> =
            figure.panels.iter().map(|p| (p.row, p.column)).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
        assert_eq!(figure.panels[3].x_label, "Stations per FU");
        assert!(figure.panels.iter().all(|p| p.y_label == IPC_AXIS_LABEL));
    }

    #[test]
    fn test_one_series_per_file_per_panel() {
        let sets = vec![two_record_set("a.txt"), two_record_set("b.txt")];
        let figure = build_figure(&sets, Some("Sweep".to_string()), 800, 600);

        assert_eq!(figure.panels.len(), 6);
        for panel in &figure.panels {
            assert_eq!(panel.series.len(), 2);
            assert_eq!(panel.series[0].label, "a.txt");
            assert_eq!(panel.series[0].xs, vec![1.0]);
            assert_eq!(panel.series[0].ys, vec![3.0]);
        }
        assert_eq!(figure.legend_entries(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_parsed_file_plots_mean_on_every_panel() {
        let content = "1,1,1,1,1,1\n2.0\nx\n1,1,1,1,1,1\n4.0\nx\n";
        let records = parse_records("a.txt", content).unwrap();
        let mut sets = vec![ResultSet::new("a.txt", records)];
        sort_all(&mut sets);

        assert_eq!(sets[0].records[0].ipc, 4.0);

        let figure = build_figure(&sets, None, 1500, 1000);
        assert_eq!(figure.panels.len(), 6);
        for panel in &figure.panels {
            assert_eq!(panel.series.len(), 1);
            assert_eq!(panel.series[0].label, "a.txt");
            assert_eq!(panel.series[0].xs, vec![1.0]);
            assert_eq!(panel.series[0].ys, vec![3.0]);
        }
    }
}
