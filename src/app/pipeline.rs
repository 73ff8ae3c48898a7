//! Shared fit pipeline.
//!
//! load -> log10 -> resolve segments -> fit each segment
//!
//! Front-ends (the `alkfit` binary, tests) only deal with presentation.

use crate::domain::{Dataset, RunConfig, SegmentFit};
use crate::error::AppError;
use crate::fit::{fit_segments, resolve_segments};
use crate::math::log_transform;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub fits: Vec<SegmentFit>,
}

/// Load the configured input and run the fits.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    let dataset = crate::io::load_dataset(&config.input)?;
    run_fit_with_dataset(config, dataset)
}

/// Run the fits on an already loaded dataset.
pub fn run_fit_with_dataset(config: &RunConfig, dataset: Dataset) -> Result<RunOutput, AppError> {
    let logs = log_transform(&dataset)?;
    let segments = resolve_segments(&config.segments, dataset.len())?;
    let fits = fit_segments(&dataset, &logs, &segments)?;

    Ok(RunOutput { dataset, fits })
}
