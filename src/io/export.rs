//! Export fit results to JSON.
//!
//! The document carries the input description plus each segment's fit and its
//! reconstructed curve, so the numbers behind the figure can be reused without
//! rerunning the tool.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Dataset, SegmentFit};
use crate::error::AppError;

/// JSON schema of an exported run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitsFile {
    pub tool: String,
    pub source: String,
    pub n_points: usize,
    pub fits: Vec<SegmentFit>,
}

/// Write the fits of a run as pretty-printed JSON.
pub fn write_fits_json(path: &Path, source: &str, n_points: usize, fits: &[SegmentFit]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    let doc = FitsFile {
        tool: "alkfit".to_string(),
        source: source.to_string(),
        n_points,
        fits: fits.to_vec(),
    };

    serde_json::to_writer_pretty(BufWriter::new(file), &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;

    log::info!("Wrote fit results to {}", path.display());
    Ok(())
}

#[derive(Serialize)]
struct DatasetRow {
    nbf: f64,
    time: f64,
}

/// Write a dataset as `nbf,time` CSV, readable by the ingest step.
pub fn write_dataset_csv(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;

    for (nbf, time) in dataset.points() {
        writer
            .serialize(DatasetRow { nbf, time })
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV '{}': {e}", path.display())))?;

    log::info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}
