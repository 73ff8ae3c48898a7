//! Figure construction and Plotters rendering.
//!
//! - `figure`: backend-independent series, ranges, ticks and annotation text
//! - `chart`: the Plotters drawing routine plus the SVG writer

pub mod chart;
pub mod figure;

pub use chart::{ChartStyle, Marker, draw_figure, write_svg};
pub use figure::{FIT_COLORS, Figure, FitLayer, POINT_COLOR};
