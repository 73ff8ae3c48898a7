//! Simple (one-regressor) ordinary least squares.
//!
//! We only ever regress log-time on log-nbf, so the closed form is enough:
//!
//! ```text
//! slope     = Sxy / Sxx
//! intercept = mean(y) - slope * mean(x)
//! r         = Sxy / sqrt(Sxx * Syy)
//! ```
//!
//! where `S` are centered sums divided by `n`. Standard errors follow the usual
//! `linregress` conventions (zero for a two-point fit).

use crate::domain::FitResult;
use crate::error::AppError;

/// Fit `y = slope * x + intercept`.
///
/// Fails with a domain error for fewer than two points, mismatched lengths,
/// non-finite input, or constant `x`.
pub fn linregress(x: &[f64], y: &[f64]) -> Result<FitResult, AppError> {
    if x.len() != y.len() {
        return Err(AppError::new(
            4,
            format!("Regression inputs differ in length ({} vs {}).", x.len(), y.len()),
        ));
    }
    let n = x.len();
    if n < 2 {
        return Err(AppError::new(
            4,
            format!("Linear regression needs at least 2 points, got {n}."),
        ));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(AppError::new(4, "Regression inputs contain non-finite values."));
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    sxx /= nf;
    syy /= nf;
    sxy /= nf;

    if sxx == 0.0 {
        return Err(AppError::new(
            4,
            "Degenerate regression: all x values are identical.",
        ));
    }

    let r_value = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let (slope_stderr, intercept_stderr) = if n == 2 {
        (0.0, 0.0)
    } else {
        let df = nf - 2.0;
        let se = ((1.0 - r_value * r_value).max(0.0) * syy / sxx / df).sqrt();
        (se, se * (sxx + x_mean * x_mean).sqrt())
    };

    Ok(FitResult {
        slope,
        intercept,
        r_value,
        slope_stderr,
        intercept_stderr,
        n_points: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_line_recovers_slope_and_intercept() {
        // y = 2x + 1
        let x = [0.5, 1.0, 1.7, 2.2, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();

        let fit = linregress(&x, &y).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared() - 1.0).abs() < 1e-12);
        assert!(fit.slope_stderr.abs() < 1e-6);
        assert_eq!(fit.n_points, 5);
    }

    #[test]
    fn negative_correlation_has_negative_r() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.1, 3.9, 2.0];
        let fit = linregress(&x, &y).unwrap();
        assert!(fit.slope < 0.0);
        assert!(fit.r_value < -0.99);
    }

    #[test]
    fn noisy_line_matches_hand_computation() {
        // x mean 2, y mean 3; after dividing by n: Sxx = 2/3, Sxy = 1, Syy = 2.
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 4.0, 4.0];
        let fit = linregress(&x, &y).unwrap();
        assert!((fit.slope - 1.5).abs() < 1e-12);
        assert!((fit.intercept - 0.0).abs() < 1e-12);
        let r = (3.0_f64 / 3.0) / ((2.0_f64 / 3.0) * (2.0_f64)).sqrt();
        assert!((fit.r_value - r).abs() < 1e-12);
        assert!(fit.slope_stderr > 0.0);
        assert!(fit.intercept_stderr > fit.slope_stderr);
    }

    #[test]
    fn two_points_fit_exactly_without_stderr() {
        let fit = linregress(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert_eq!(fit.slope_stderr, 0.0);
        assert_eq!(fit.intercept_stderr, 0.0);
    }

    #[test]
    fn single_point_is_a_domain_error() {
        let err = linregress(&[2.0], &[3.0]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains("at least 2 points"));
    }

    #[test]
    fn constant_x_is_degenerate() {
        let err = linregress(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.message().contains("identical"));
    }

    #[test]
    fn constant_y_gives_zero_r() {
        let fit = linregress(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_value, 0.0);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(linregress(&[1.0, 2.0], &[1.0]).is_err());
    }
}
