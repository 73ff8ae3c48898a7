//! Render-ready description of the scaling figure.
//!
//! All series, bounds, ticks and annotation text are computed here, outside any
//! drawing backend, so the same `Figure` renders into SVG and into the terminal
//! and can be checked without drawing anything.

use plotters::style::{BLUE, GREEN, MAGENTA, RED, RGBColor};

use crate::domain::{ChartConfig, Dataset, SegmentFit};
use crate::error::AppError;
use crate::report::{equation_text, legend_label, r_squared_text};

/// Per-fit colours, in segment order.
pub const FIT_COLORS: [RGBColor; 3] = [RED, GREEN, MAGENTA];
pub const POINT_COLOR: RGBColor = BLUE;

/// Fraction of the log-span added on each side of the data.
const LOG_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct FitLayer {
    pub label: String,
    pub color: RGBColor,
    /// Fitted curve over the segment's own x-range.
    pub curve: Vec<(f64, f64)>,
    /// Lines of the on-plot annotation (equation, R²).
    pub annotation: Vec<String>,
    /// Top-left of the annotation in plot-area fractions.
    pub anchor: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    /// Where the points came from, for headers.
    pub source: String,
    pub x_desc: String,
    pub y_desc: String,
    pub points: Vec<(f64, f64)>,
    pub fits: Vec<FitLayer>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Tick positions; the axis ranges always include them.
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

impl Figure {
    pub fn build(dataset: &Dataset, fits: &[SegmentFit], chart: &ChartConfig) -> Result<Self, AppError> {
        let points = dataset.points();

        let x_ticks = positive_ticks(&chart.x_ticks);
        let y_ticks = positive_ticks(&chart.y_ticks);

        // The axes span the data, the curves and every configured tick.
        let xs = points.iter().map(|p| p.0).chain(x_ticks.iter().copied());
        let ys = points
            .iter()
            .map(|p| p.1)
            .chain(fits.iter().flat_map(|f| f.curve.iter().map(|p| p.1)))
            .chain(y_ticks.iter().copied());

        let x_range = log_padded_range(xs)
            .ok_or_else(|| AppError::new(4, "Cannot place a log x-axis: no positive nbf values."))?;
        let y_range = log_padded_range(ys)
            .ok_or_else(|| AppError::new(4, "Cannot place a log y-axis: no positive time values."))?;

        let layers = fits
            .iter()
            .enumerate()
            .map(|(i, sf)| FitLayer {
                label: legend_label(sf),
                color: FIT_COLORS[i % FIT_COLORS.len()],
                curve: sf.curve.clone(),
                annotation: vec![equation_text(&sf.fit), r_squared_text(&sf.fit)],
                anchor: annotation_anchor(&chart.annotation_anchors, i),
            })
            .collect();

        Ok(Self {
            title: chart.title.clone(),
            source: dataset.source.clone(),
            x_desc: chart.x_desc.clone(),
            y_desc: chart.y_desc.clone(),
            points,
            fits: layers,
            x_range,
            y_range,
            x_ticks,
            y_ticks,
        })
    }

    /// Map plot-area fractions (0..1 on each axis) to data coordinates on the
    /// log-log axes.
    pub fn axes_to_data(&self, fx: f64, fy: f64) -> (f64, f64) {
        (log_lerp(self.x_range, fx), log_lerp(self.y_range, fy))
    }
}

/// Configured anchor for fit `i`; extra fits stack 0.2 below the last one.
fn annotation_anchor(anchors: &[(f64, f64)], i: usize) -> (f64, f64) {
    match anchors.get(i) {
        Some(&anchor) => anchor,
        None => {
            let (x, y) = anchors.last().copied().unwrap_or((0.05, 0.95));
            let extra = (i + 1 - anchors.len().max(1)) as f64;
            (x, (y - 0.2 * extra).max(0.0))
        }
    }
}

fn log_lerp((lo, hi): (f64, f64), t: f64) -> f64 {
    let (l0, l1) = (lo.log10(), hi.log10());
    10f64.powf(l0 + t * (l1 - l0))
}

/// Min/max of the positive values, widened by `LOG_MARGIN` of the log-span.
fn log_padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let (l0, l1) = (lo.log10(), hi.log10());
    // A single distinct value still gets a visible decade slice.
    let span = if l1 > l0 { l1 - l0 } else { 0.2 };
    let pad = span * LOG_MARGIN;
    Some((10f64.powf(l0 - pad), 10f64.powf(l1 + pad)))
}

/// A log axis cannot place zero or negative ticks.
fn positive_ticks(ticks: &[f64]) -> Vec<f64> {
    ticks.iter().copied().filter(|t| t.is_finite() && *t > 0.0).collect()
}
