//! Per-segment log-log fitting.
//!
//! For each segment we:
//! - slice the log-space columns
//! - run OLS on the slice
//! - rebuild the fitted curve on the original scale at the segment's own nbf values
//!
//! Segments are fitted independently; overlapping points are used by both.

use crate::domain::{Dataset, FitResult, LogDataset, Segment, SegmentFit};
use crate::error::AppError;
use crate::math::linregress;

/// Fit one segment.
pub fn fit_segment(dataset: &Dataset, logs: &LogDataset, segment: &Segment) -> Result<SegmentFit, AppError> {
    if segment.end > dataset.len() || segment.end > logs.len() {
        return Err(AppError::new(
            4,
            format!("{}: segment ends past the dataset.", segment.label),
        ));
    }

    let range = segment.range();
    let fit = linregress(&logs.log_nbf[range.clone()], &logs.log_time[range.clone()])
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", segment.label)))?;

    let curve = fitted_curve(&fit, &dataset.nbf[range]);

    log::info!(
        "{}: slope={:.4} intercept={:.4} R²={:.4} (n={})",
        segment.label,
        fit.slope,
        fit.intercept,
        fit.r_squared(),
        fit.n_points
    );

    Ok(SegmentFit {
        segment: segment.clone(),
        fit,
        curve,
    })
}

/// Fit every segment, in order.
pub fn fit_segments(dataset: &Dataset, logs: &LogDataset, segments: &[Segment]) -> Result<Vec<SegmentFit>, AppError> {
    segments
        .iter()
        .map(|segment| fit_segment(dataset, logs, segment))
        .collect()
}

/// `(x, 10^(slope·log10(x) + intercept))` for each `x`.
pub fn fitted_curve(fit: &FitResult, nbf: &[f64]) -> Vec<(f64, f64)> {
    nbf.iter().map(|&x| (x, fit.predict(x))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_segments;
    use crate::fit::resolve_segments;
    use crate::math::log_transform;

    const NBF: [f64; 9] = [400.0, 500.0, 600.0, 700.0, 800.0, 1000.0, 1200.0, 1400.0, 1600.0];

    fn power_law(c: f64, k: f64) -> Dataset {
        let time = NBF.iter().map(|x| c * x.powf(k)).collect();
        Dataset::new(NBF.to_vec(), time, "power law").unwrap()
    }

    #[test]
    fn exact_power_law_round_trips_through_both_segments() {
        let ds = power_law(0.02, 2.1);
        let logs = log_transform(&ds).unwrap();
        let segments = resolve_segments(&default_segments(), ds.len()).unwrap();
        let fits = fit_segments(&ds, &logs, &segments).unwrap();

        assert_eq!(fits.len(), 2);
        for sf in &fits {
            assert!((sf.fit.slope - 2.1).abs() < 1e-9);
            assert!((sf.fit.intercept - 0.02f64.log10()).abs() < 1e-9);
            assert!((sf.fit.r_squared() - 1.0).abs() < 1e-9);
            for (&(x, y_fit), &y) in sf.curve.iter().zip(&ds.time[sf.segment.range()]) {
                assert!(((y_fit - y) / y).abs() < 1e-9, "x={x}: {y_fit} vs {y}");
            }
        }
        assert_eq!(fits[0].curve.len(), 4);
        assert_eq!(fits[1].curve.len(), 6);
        assert_eq!(fits[0].curve[3].0, fits[1].curve[0].0);
    }

    #[test]
    fn segments_are_fitted_independently() {
        // Steeper below the break at 700, flatter above it.
        let knee = (700.0f64 / 400.0).powf(3.0);
        let time: Vec<f64> = NBF
            .iter()
            .map(|&x| {
                if x <= 700.0 {
                    (x / 400.0).powf(3.0)
                } else {
                    knee * (x / 700.0).powf(1.5)
                }
            })
            .collect();
        let ds = Dataset::new(NBF.to_vec(), time, "two regimes").unwrap();
        let logs = log_transform(&ds).unwrap();
        let segments = resolve_segments(&default_segments(), ds.len()).unwrap();
        let fits = fit_segments(&ds, &logs, &segments).unwrap();

        assert!((fits[0].fit.slope - 3.0).abs() < 1e-9);
        assert!((fits[1].fit.slope - 1.5).abs() < 1e-9);
    }

    #[test]
    fn one_point_segment_fails_with_domain_error() {
        let ds = power_law(1.0, 2.0);
        let logs = log_transform(&ds).unwrap();
        let segment = Segment {
            label: "Fit 3".to_string(),
            start: 8,
            end: 9,
        };
        let err = fit_segment(&ds, &logs, &segment).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().starts_with("Fit 3:"));
        assert!(err.message().contains("at least 2 points"));
    }

    #[test]
    fn segment_past_end_is_rejected() {
        let ds = power_law(1.0, 2.0);
        let logs = log_transform(&ds).unwrap();
        let segment = Segment {
            label: "Fit 1".to_string(),
            start: 0,
            end: 10,
        };
        assert!(fit_segment(&ds, &logs, &segment).is_err());
    }
}
