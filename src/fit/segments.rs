//! Resolve configured segment boundaries against the dataset length.

use crate::domain::{Segment, SegmentSpec};
use crate::error::AppError;

/// Turn each spec into a concrete `[start, end)` range over `n` points.
///
/// Open ends run to `n`. Ranges must be non-empty and lie inside the dataset;
/// overlap between segments is allowed. Whether a range has enough points to
/// fit is left to the regression.
pub fn resolve_segments(specs: &[SegmentSpec], n: usize) -> Result<Vec<Segment>, AppError> {
    specs.iter().map(|spec| resolve_segment(spec, n)).collect()
}

fn resolve_segment(spec: &SegmentSpec, n: usize) -> Result<Segment, AppError> {
    let end = spec.end.unwrap_or(n);
    if end > n {
        return Err(AppError::new(
            3,
            format!(
                "{}: range [{}, {end}) exceeds the dataset ({n} points).",
                spec.label, spec.start
            ),
        ));
    }
    if spec.start >= end {
        return Err(AppError::new(
            3,
            format!("{}: empty range [{}, {end}).", spec.label, spec.start),
        ));
    }

    let segment = Segment {
        label: spec.label.clone(),
        start: spec.start,
        end,
    };
    log::debug!("{}: points {}..={}", segment.label, segment.start + 1, segment.end);
    Ok(segment)
}
