//! Plotly rendering of a [`Figure`].

use super::figure::{Figure, Panel, GRID_COLUMNS, GRID_ROWS};
use anyhow::{Context, Result};
use plotly::common::{Line, Mode, Title};
use plotly::layout::{Axis, GridPattern, LayoutGrid, RowOrder};
use plotly::{Layout, Plot, Scatter};
use std::path::Path;
use tracing::{debug, info};

/// Line colors, assigned per result file so a file keeps its color in every panel.
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

/// Axis reference suffix for panel `index` ("", "2", "3", ...).
fn axis_suffix(index: usize) -> String {
    if index == 0 {
        String::new()
    } else {
        (index + 1).to_string()
    }
}

/// Attach the axes of panel `index` to the layout.
fn with_panel_axes(layout: Layout, index: usize, x: Axis, y: Axis) -> Layout {
    match index {
        0 => layout.x_axis(x).y_axis(y),
        1 => layout.x_axis2(x).y_axis2(y),
        2 => layout.x_axis3(x).y_axis3(y),
        3 => layout.x_axis4(x).y_axis4(y),
        4 => layout.x_axis5(x).y_axis5(y),
        5 => layout.x_axis6(x).y_axis6(y),
        _ => layout,
    }
}

fn add_panel_traces(plot: &mut Plot, panel: &Panel, index: usize, legend: &[&str]) {
    let suffix = axis_suffix(index);
    let x_ref = format!("x{}", suffix);
    let y_ref = format!("y{}", suffix);

    for series in &panel.series {
        let slot = legend
            .iter()
            .position(|label| *label == series.label)
            .unwrap_or(0);

        let trace = Scatter::new(series.xs.clone(), series.ys.clone())
            .name(&series.label)
            .mode(Mode::LinesMarkers)
            .legend_group(&series.label)
            // One legend entry per file, taken from the first panel
            .show_legend(index == 0)
            .line(Line::new().color(PALETTE[slot % PALETTE.len()]))
            .x_axis(&x_ref)
            .y_axis(&y_ref);
        plot.add_trace(trace);
    }
}

/// Convert the figure into a plotly plot with a 3x2 grid of independent axes.
pub fn to_plotly(figure: &Figure) -> Plot {
    let legend = figure.legend_entries();
    let mut plot = Plot::new();

    let grid = LayoutGrid::new()
        .rows(GRID_ROWS as _)
        .columns(GRID_COLUMNS as _)
        .pattern(GridPattern::Independent)
        .row_order(RowOrder::TopToBottom);

    let mut layout = Layout::new()
        .grid(grid)
        .width(figure.width)
        .height(figure.height);

    if let Some(ref title) = figure.title {
        layout = layout.title(Title::new(title));
    }

    for panel in &figure.panels {
        let index = panel.row * GRID_COLUMNS + panel.column;
        debug!(
            "Panel {} ({}): {} series",
            index + 1,
            panel.dimension,
            panel.series.len()
        );
        add_panel_traces(&mut plot, panel, index, &legend);

        let x_axis = Axis::new().title(Title::new(&panel.x_label));
        let y_axis = Axis::new().title(Title::new(&panel.y_label));
        layout = with_panel_axes(layout, index, x_axis, y_axis);
    }

    plot.set_layout(layout);
    plot
}

/// Render the plot as a standalone HTML page.
pub fn to_standalone_html(plot: &Plot, page_title: &str) -> String {
    let plot_html = plot.to_inline_html(Some("ipc-sweep"));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{page_title}</title>
<script src="{cdn}"></script>
</head>
<body>
{plot_html}
</body>
</html>
"#,
        page_title = page_title,
        cdn = PLOTLY_CDN,
        plot_html = plot_html,
    )
}

/// Write the plot to an HTML file.
pub fn write_html(plot: &Plot, page_title: &str, path: &Path) -> Result<()> {
    let html = to_standalone_html(plot, page_title);
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write plot to {}", path.display()))?;
    info!("Plot written to {}", path.display());
    Ok(())
}

/// Open the plot in the default browser.
pub fn show(plot: &Plot) {
    info!("Opening interactive plot");
    plot.show();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, ResultSet};
    use crate::plot::figure::build_figure;
    use tempfile::TempDir;

    fn sample_sets() -> Vec<ResultSet> {
        vec![
            ResultSet::new(
                "baseline.txt",
                vec![
                    Record::new([1.0, 1.0, 1.0, 2.0, 32.0, 2.0], 0.9),
                    Record::new([2.0, 1.0, 1.0, 2.0, 32.0, 4.0], 1.1),
                ],
            ),
            ResultSet::new("wide.txt", vec![Record::new([4.0; 6], 2.2)]),
        ]
    }

    #[test]
    fn test_axis_suffix() {
        assert_eq!(axis_suffix(0), "");
        assert_eq!(axis_suffix(1), "2");
        assert_eq!(axis_suffix(5), "6");
    }

    #[test]
    fn test_empty_figure_defines_all_axes() {
        let figure = build_figure(&[], None, 1500, 1000);
        let html = to_plotly(&figure).to_inline_html(Some("test"));

        assert!(html.contains("xaxis6"));
        assert!(html.contains("yaxis6"));
        assert!(html.contains("Fetch Width"));
    }

    #[test]
    fn test_traces_labeled_by_file() {
        let figure = build_figure(&sample_sets(), Some("IPC sweep".to_string()), 1500, 1000);
        let html = to_plotly(&figure).to_inline_html(Some("test"));

        assert!(html.contains("baseline.txt"));
        assert!(html.contains("wide.txt"));
        assert!(html.contains("Average IPC"));
        assert!(html.contains("IPC sweep"));
    }

    #[test]
    fn test_write_html() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sweep.html");

        let figure = build_figure(&sample_sets(), None, 1500, 1000);
        write_html(&to_plotly(&figure), "IPC sweep", &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains(PLOTLY_CDN));
        assert!(content.contains("<title>IPC sweep</title>"));
    }
}
