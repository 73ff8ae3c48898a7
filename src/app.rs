//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads configuration (`.env` overrides)
//! - runs the fit pipeline
//! - prints the summary
//! - writes the SVG figure (and the optional JSON export)
//! - opens the terminal viewer

use std::io::IsTerminal;

use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::Figure;

pub mod pipeline;

/// Entry point for the `alkfit` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let config = RunConfig::from_env();
    let figure = render(&config)?;

    if !config.show {
        log::debug!("Viewer disabled");
    } else if !std::io::stdout().is_terminal() {
        log::info!("stdout is not a terminal; skipping the interactive view");
    } else {
        crate::tui::show(&figure, &figure.source)?;
    }

    Ok(())
}

/// Everything except the interactive view: fit, report, write files.
///
/// Returns the figure so callers can display it.
pub fn render(config: &RunConfig) -> Result<Figure, AppError> {
    let run = pipeline::run_fit(config)?;

    println!("{}", crate::report::format_run_summary(&run.dataset, &run.fits));

    let figure = Figure::build(&run.dataset, &run.fits, &config.chart)?;
    crate::plot::write_svg(&config.output_svg, &figure, (config.chart.width, config.chart.height))?;

    if let Some(path) = &config.export_json {
        crate::io::write_fits_json(path, &run.dataset.source, run.dataset.len(), &run.fits)?;
    }

    Ok(figure)
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A second init (tests, embedding) keeps the first logger.
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::{REFERENCE_NBF, SyntheticSpec, generate_dataset};
    use crate::domain::InputSpec;

    fn temp(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("alkfit-app-{}-{name}", std::process::id()))
    }

    #[test]
    fn end_to_end_from_csv_writes_figure_and_export() {
        let spec = SyntheticSpec {
            nbf: REFERENCE_NBF.to_vec(),
            low_exponent: 2.0,
            high_exponent: 2.0,
            ..SyntheticSpec::default()
        };
        let dataset = generate_dataset(&spec).unwrap();
        let csv = temp("bench.csv");
        crate::io::write_dataset_csv(&csv, &dataset).unwrap();

        let config = RunConfig {
            input: InputSpec {
                path: csv.clone(),
                ..InputSpec::default()
            },
            output_svg: temp("alktime.svg"),
            export_json: Some(temp("fits.json")),
            show: false,
            ..RunConfig::default()
        };

        let figure = render(&config).unwrap();
        let svg_len = std::fs::metadata(&config.output_svg).map(|m| m.len()).unwrap_or(0);
        let json = std::fs::read_to_string(temp("fits.json")).unwrap_or_default();
        for path in [csv, config.output_svg.clone(), temp("fits.json")] {
            std::fs::remove_file(path).ok();
        }

        assert!(svg_len > 0);
        assert_eq!(figure.points.len(), 9);
        assert_eq!(figure.fits.len(), 2);
        assert!(json.contains("\"Fit 2\""));
    }

    #[test]
    fn missing_input_propagates_io_error() {
        let config = RunConfig {
            input: InputSpec {
                path: PathBuf::from("/nonexistent/qee.xlsb.xlsx"),
                ..InputSpec::default()
            },
            output_svg: temp("never.svg"),
            show: false,
            ..RunConfig::default()
        };
        let err = render(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!config.output_svg.exists());
    }
}
