//! Write a synthetic alkane-chain benchmark as `nbf,time` CSV.
//!
//! Usage: `generate_sample [OUTPUT.csv] [SEED]` (defaults: `alkjob_sample.csv`, 42).
//! Point `ALKFIT_INPUT` at the result to run `alkfit` without the workbook.

use std::path::PathBuf;
use std::process::ExitCode;

use alkane_scaling::data::{SyntheticSpec, generate_dataset};
use alkane_scaling::error::AppError;
use alkane_scaling::io::write_dataset_csv;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "alkjob_sample.csv".to_string()));

    let mut spec = SyntheticSpec::default();
    if let Some(seed) = args.next() {
        spec.seed = seed
            .parse()
            .map_err(|e| AppError::new(2, format!("Invalid seed {seed:?}: {e}")))?;
    }

    let dataset = generate_dataset(&spec)?;
    write_dataset_csv(&path, &dataset)
}
