//! Base-10 log transform of the benchmark data.

use crate::domain::{Dataset, LogDataset};
use crate::error::AppError;

/// Element-wise `log10`, same length and order.
///
/// Every input must be finite and strictly positive.
pub fn log10_all(values: &[f64]) -> Result<Vec<f64>, AppError> {
    values
        .iter()
        .enumerate()
        .map(|(idx, &v)| {
            if v.is_finite() && v > 0.0 {
                Ok(v.log10())
            } else {
                Err(AppError::new(
                    4,
                    format!("log10 domain error at index {idx}: value {v} is not strictly positive."),
                ))
            }
        })
        .collect()
}

/// Log-transform both columns of a dataset.
pub fn log_transform(dataset: &Dataset) -> Result<LogDataset, AppError> {
    let log_nbf = log10_all(&dataset.nbf).map_err(|e| AppError::new(e.exit_code(), format!("nbf: {e}")))?;
    let log_time = log10_all(&dataset.time).map_err(|e| AppError::new(e.exit_code(), format!("time: {e}")))?;
    Ok(LogDataset { log_nbf, log_time })
}
