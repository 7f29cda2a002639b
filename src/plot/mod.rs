//! Sweep chart construction and rendering.

pub mod figure;
pub mod render;

pub use figure::build_figure;
pub use render::{show, to_plotly, write_html};
