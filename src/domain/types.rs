//! Shared domain types.
//!
//! These types are kept lightweight so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON (segments and fits)
//! - turned into a render-ready figure

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Benchmark observations as two index-aligned sequences.
///
/// Order is the row order of the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Number of basis functions per job.
    pub nbf: Vec<f64>,
    /// Wall time per job, in seconds.
    pub time: Vec<f64>,
    /// Where the rows came from (e.g. `qee.xlsb.xlsx [alkjob]`).
    pub source: String,
}

impl Dataset {
    pub fn new(nbf: Vec<f64>, time: Vec<f64>, source: impl Into<String>) -> Result<Self, AppError> {
        if nbf.len() != time.len() {
            return Err(AppError::new(
                3,
                format!(
                    "Column length mismatch: nbf has {} values, time has {}.",
                    nbf.len(),
                    time.len()
                ),
            ));
        }
        Ok(Self {
            nbf,
            time,
            source: source.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.nbf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nbf.is_empty()
    }

    /// `(nbf, time)` pairs in row order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.nbf.iter().copied().zip(self.time.iter().copied()).collect()
    }

    pub fn nbf_range(&self) -> Option<(f64, f64)> {
        min_max(&self.nbf)
    }

    pub fn time_range(&self) -> Option<(f64, f64)> {
        min_max(&self.time)
    }
}

/// Base-10 logarithms of a [`Dataset`], same length and alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct LogDataset {
    pub log_nbf: Vec<f64>,
    pub log_time: Vec<f64>,
}

impl LogDataset {
    pub fn len(&self) -> usize {
        self.log_nbf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_nbf.is_empty()
    }
}

/// Segment boundaries as configured, before the dataset length is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpec {
    pub label: String,
    pub start: usize,
    /// Exclusive end index; `None` runs to the end of the dataset.
    pub end: Option<usize>,
}

impl SegmentSpec {
    pub fn new(label: impl Into<String>, start: usize, end: Option<usize>) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// A contiguous, resolved index range `[start, end)` over the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Ordinary least-squares line through log-space points.
///
/// `log10(time) = slope * log10(nbf) + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient of the fitted points.
    pub r_value: f64,
    pub slope_stderr: f64,
    pub intercept_stderr: f64,
    pub n_points: usize,
}

impl FitResult {
    /// Coefficient of determination.
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }

    /// Predicted `log10(y)` at `log10(x)`.
    pub fn predict_log(&self, log_x: f64) -> f64 {
        self.slope * log_x + self.intercept
    }

    /// Predicted `y` on the original scale.
    pub fn predict(&self, x: f64) -> f64 {
        10f64.powf(self.predict_log(x.log10()))
    }
}

/// One segment's fit plus its curve on the original scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentFit {
    pub segment: Segment,
    pub fit: FitResult,
    /// `(nbf, fitted time)` at the segment's own nbf values.
    pub curve: Vec<(f64, f64)>,
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut it = values.iter().copied().filter(|v| v.is_finite());
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_rejects_mismatched_columns() {
        let err = Dataset::new(vec![1.0, 2.0], vec![1.0], "test").unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("mismatch"));
    }

    #[test]
    fn dataset_ranges_and_points() {
        let ds = Dataset::new(vec![800.0, 400.0, 1600.0], vec![3.0, 1.0, 9.0], "test").unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.nbf_range(), Some((400.0, 1600.0)));
        assert_eq!(ds.time_range(), Some((1.0, 9.0)));
        assert_eq!(ds.points()[0], (800.0, 3.0));
    }

    #[test]
    fn segment_range_is_half_open() {
        let seg = Segment {
            label: "A".to_string(),
            start: 0,
            end: 4,
        };
        assert_eq!(seg.len(), 4);
        assert!(seg.contains(3));
        assert!(!seg.contains(4));
    }

    #[test]
    fn fit_result_predicts_power_law() {
        // log10(y) = 2 log10(x) + 1  <=>  y = 10 x^2
        let fit = FitResult {
            slope: 2.0,
            intercept: 1.0,
            r_value: 1.0,
            slope_stderr: 0.0,
            intercept_stderr: 0.0,
            n_points: 3,
        };
        assert!((fit.predict(3.0) - 90.0).abs() < 1e-9);
        assert!((fit.r_squared() - 1.0).abs() < 1e-12);
    }
}
