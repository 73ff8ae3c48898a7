//! Run configuration.
//!
//! Everything the pipeline needs is a default here. `RunConfig::from_env` lets a
//! `.env` file (or the environment) relocate the input and output files and
//! switch the viewer off. The fit boundaries, ticks and labels stay fixed.
//!
//! The figure is written as SVG (`alktime.svg`) in place of `alktime.eps`:
//! Plotters has no PostScript backend.

use std::path::PathBuf;

use crate::domain::SegmentSpec;

pub const DEFAULT_INPUT: &str = "qee.xlsb.xlsx";
pub const DEFAULT_SHEET: &str = "alkjob";
pub const DEFAULT_OUTPUT: &str = "alktime.svg";

pub const ENV_INPUT: &str = "ALKFIT_INPUT";
pub const ENV_SHEET: &str = "ALKFIT_SHEET";
pub const ENV_OUTPUT: &str = "ALKFIT_OUTPUT";
pub const ENV_EXPORT: &str = "ALKFIT_EXPORT";
pub const ENV_SHOW: &str = "ALKFIT_SHOW";

/// Where to read the benchmark table from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub path: PathBuf,
    /// Sheet name for workbook input; ignored for CSV.
    pub sheet: String,
    pub x_column: String,
    pub y_column: String,
}

impl Default for InputSpec {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT),
            sheet: DEFAULT_SHEET.to_string(),
            x_column: "nbf".to_string(),
            y_column: "time".to_string(),
        }
    }
}

/// Fixed presentation of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    /// Top-left anchor of each fit's annotation, as fractions of the plot area
    /// (0,0 bottom-left, 1,1 top-right). One per segment, in segment order.
    pub annotation_anchors: Vec<(f64, f64)>,
    /// SVG size in pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Log-Log Plot of Time vs Nbf for Alkane Chain".to_string(),
            x_desc: "Number of Basis Functions (nbf)".to_string(),
            y_desc: "Time (seconds)".to_string(),
            x_ticks: vec![400.0, 600.0, 800.0, 1000.0, 1200.0, 1600.0],
            y_ticks: vec![10_000.0, 30_000.0, 90_000.0, 150_000.0],
            annotation_anchors: vec![(0.05, 0.95), (0.05, 0.75)],
            width: 1000,
            height: 800,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: InputSpec,
    /// The two fit ranges. They overlap at index 3 so both lines meet at a
    /// shared observation.
    pub segments: Vec<SegmentSpec>,
    pub chart: ChartConfig,
    pub output_svg: PathBuf,
    pub export_json: Option<PathBuf>,
    /// Open the terminal viewer after writing the figure.
    pub show: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: InputSpec::default(),
            segments: default_segments(),
            chart: ChartConfig::default(),
            output_svg: PathBuf::from(DEFAULT_OUTPUT),
            export_json: None,
            show: true,
        }
    }
}

impl RunConfig {
    /// Defaults plus overrides from `.env` / the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `ALKFIT_*` overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(path) = get(ENV_INPUT) {
            self.input.path = PathBuf::from(path);
        }
        if let Some(sheet) = get(ENV_SHEET) {
            self.input.sheet = sheet;
        }
        if let Some(path) = get(ENV_OUTPUT) {
            self.output_svg = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_EXPORT) {
            self.export_json = Some(PathBuf::from(path));
        }
        if let Some(flag) = get(ENV_SHOW) {
            match parse_flag(&flag) {
                Some(show) => self.show = show,
                None => log::warn!("Ignoring unrecognized {ENV_SHOW}={flag:?}"),
            }
        }
        self
    }
}

/// Fit 1 over points 1-4, fit 2 over points 4..N.
pub fn default_segments() -> Vec<SegmentSpec> {
    vec![
        SegmentSpec::new("Fit 1", 0, Some(4)),
        SegmentSpec::new("Fit 2", 3, None),
    ]
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_reference_run() {
        let config = RunConfig::default();
        assert_eq!(config.input.path, PathBuf::from("qee.xlsb.xlsx"));
        assert_eq!(config.input.sheet, "alkjob");
        assert_eq!(config.segments[0], SegmentSpec::new("Fit 1", 0, Some(4)));
        assert_eq!(config.segments[1], SegmentSpec::new("Fit 2", 3, None));
        assert_eq!(config.chart.y_ticks, vec![10_000.0, 30_000.0, 90_000.0, 150_000.0]);
        assert!(config.show);
        assert!(config.export_json.is_none());
    }

    #[test]
    fn overrides_replace_paths_and_flags() {
        let config = RunConfig::default().with_overrides(lookup(&[
            (ENV_INPUT, "bench.csv"),
            (ENV_SHEET, "runs"),
            (ENV_OUTPUT, "out/fig.svg"),
            (ENV_EXPORT, "fits.json"),
            (ENV_SHOW, "off"),
        ]));
        assert_eq!(config.input.path, PathBuf::from("bench.csv"));
        assert_eq!(config.input.sheet, "runs");
        assert_eq!(config.output_svg, PathBuf::from("out/fig.svg"));
        assert_eq!(config.export_json, Some(PathBuf::from("fits.json")));
        assert!(!config.show);
    }

    #[test]
    fn overrides_never_touch_segments_or_chart() {
        let config = RunConfig::default().with_overrides(lookup(&[
            (ENV_INPUT, "bench.csv"),
            (ENV_OUTPUT, "fig.svg"),
            (ENV_SHOW, "0"),
            ("ALKFIT_SEGMENTS", "0:5"),
            ("ALKFIT_X_TICKS", "1,2,3"),
        ]));
        assert_eq!(config.segments, default_segments());
        assert_eq!(config.chart, ChartConfig::default());
    }

    #[test]
    fn blank_and_unknown_values_keep_defaults() {
        let config = RunConfig::default().with_overrides(lookup(&[(ENV_INPUT, "  "), (ENV_SHOW, "maybe")]));
        assert_eq!(config.input.path, PathBuf::from(DEFAULT_INPUT));
        assert!(config.show);
    }
}
