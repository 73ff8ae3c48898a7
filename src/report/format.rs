//! Formatted terminal output and figure text.
//!
//! We keep formatting code in one place so the figure annotations, legend and
//! terminal summary always agree on how a fit is written.

use crate::domain::{Dataset, FitResult, SegmentFit};

/// `log(y) = 2.31·log(x) + -1.98`, two decimals.
pub fn equation_text(fit: &FitResult) -> String {
    format!("log(y) = {:.2}·log(x) + {:.2}", fit.slope, fit.intercept)
}

/// `R² = 0.9987`, four decimals.
pub fn r_squared_text(fit: &FitResult) -> String {
    format!("R² = {:.4}", fit.r_squared())
}

/// Legend entry for a segment: `Fit 1: log(y) = ...`.
pub fn legend_label(fit: &SegmentFit) -> String {
    format!("{}: {}", fit.segment.label, equation_text(&fit.fit))
}

/// Integer rendering with comma thousands separators (`150000` -> `150,000`).
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format the run summary (dataset + one line per fit).
pub fn format_run_summary(dataset: &Dataset, fits: &[SegmentFit]) -> String {
    let mut out = String::new();

    out.push_str("=== alkfit - log-log scaling fit ===\n");
    out.push_str(&format!("Input: {}\n", dataset.source));
    out.push_str(&format!("Points: n={}", dataset.len()));
    if let (Some((x0, x1)), Some((y0, y1))) = (dataset.nbf_range(), dataset.time_range()) {
        out.push_str(&format!(
            " | nbf=[{}, {}] | time=[{}, {}]s",
            format_thousands(x0),
            format_thousands(x1),
            format_thousands(y0),
            format_thousands(y1)
        ));
    }
    out.push('\n');

    out.push_str("\nFits:\n");
    for sf in fits {
        out.push_str(&format!(
            "- {:<6} points {}-{} (n={}): {}  {}  se(slope)={:.4} se(intercept)={:.4}\n",
            sf.segment.label,
            sf.segment.start + 1,
            sf.segment.end,
            sf.fit.n_points,
            equation_text(&sf.fit),
            r_squared_text(&sf.fit),
            sf.fit.slope_stderr,
            sf.fit.intercept_stderr,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Segment;

    fn sample_fit() -> SegmentFit {
        SegmentFit {
            segment: Segment {
                label: "Fit 2".to_string(),
                start: 3,
                end: 9,
            },
            fit: FitResult {
                slope: 1.7012,
                intercept: -0.8349,
                r_value: -0.99935,
                slope_stderr: 0.0123,
                intercept_stderr: 0.0456,
                n_points: 6,
            },
            curve: Vec::new(),
        }
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(400.0), "400");
        assert_eq!(format_thousands(1600.0), "1,600");
        assert_eq!(format_thousands(10_000.0), "10,000");
        assert_eq!(format_thousands(150_000.0), "150,000");
        assert_eq!(format_thousands(1_234_567.4), "1,234,567");
        assert_eq!(format_thousands(-30_000.0), "-30,000");
    }

    #[test]
    fn equation_and_r_squared_text() {
        let sf = sample_fit();
        assert_eq!(equation_text(&sf.fit), "log(y) = 1.70·log(x) + -0.83");
        assert_eq!(r_squared_text(&sf.fit), "R² = 0.9987");
        assert_eq!(legend_label(&sf), "Fit 2: log(y) = 1.70·log(x) + -0.83");
    }

    #[test]
    fn summary_lists_each_fit_with_one_based_points() {
        let ds = Dataset::new(vec![400.0, 1600.0], vec![10_000.0, 150_000.0], "bench.csv").unwrap();
        let text = format_run_summary(&ds, &[sample_fit()]);
        assert!(text.contains("Input: bench.csv"));
        assert!(text.contains("nbf=[400, 1,600]"));
        assert!(text.contains("points 4-9 (n=6)"));
        assert!(text.contains("R² = 0.9987"));
    }
}
