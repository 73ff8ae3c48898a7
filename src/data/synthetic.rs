//! Synthetic alkane-chain timing data.
//!
//! Produces a two-regime power law: below `break_nbf` time grows as
//! `nbf^low_exponent`, above it as `nbf^high_exponent`, continuous at the break.
//! Each point is scaled by log-normal noise (Normal in log10 space), drawn from a
//! seeded `StdRng` so samples are reproducible.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::Dataset;
use crate::error::AppError;

/// nbf values of the reference benchmark.
pub const REFERENCE_NBF: [f64; 9] = [400.0, 500.0, 600.0, 700.0, 800.0, 1000.0, 1200.0, 1400.0, 1600.0];

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    pub nbf: Vec<f64>,
    /// Time at `base_nbf`, in seconds.
    pub base_time: f64,
    pub base_nbf: f64,
    pub break_nbf: f64,
    pub low_exponent: f64,
    pub high_exponent: f64,
    /// Standard deviation of the noise in log10(time).
    pub noise_sigma: f64,
    pub seed: u64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            nbf: REFERENCE_NBF.to_vec(),
            base_time: 10_000.0,
            base_nbf: 400.0,
            break_nbf: 700.0,
            low_exponent: 2.3,
            high_exponent: 1.7,
            noise_sigma: 0.01,
            seed: 42,
        }
    }
}

impl SyntheticSpec {
    /// Noise-free time at `nbf`.
    pub fn expected_time(&self, nbf: f64) -> f64 {
        if nbf <= self.break_nbf {
            self.base_time * (nbf / self.base_nbf).powf(self.low_exponent)
        } else {
            let at_break = self.base_time * (self.break_nbf / self.base_nbf).powf(self.low_exponent);
            at_break * (nbf / self.break_nbf).powf(self.high_exponent)
        }
    }
}

pub fn generate_dataset(spec: &SyntheticSpec) -> Result<Dataset, AppError> {
    if spec.nbf.is_empty() {
        return Err(AppError::new(2, "Synthetic nbf grid is empty."));
    }
    if spec.nbf.iter().any(|&x| !(x.is_finite() && x > 0.0)) {
        return Err(AppError::new(2, "Synthetic nbf values must be strictly positive."));
    }
    if !(spec.base_time > 0.0 && spec.base_nbf > 0.0 && spec.break_nbf > 0.0) {
        return Err(AppError::new(2, "Synthetic base/break values must be strictly positive."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let noise = Normal::new(0.0, spec.noise_sigma)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let time = spec
        .nbf
        .iter()
        .map(|&x| spec.expected_time(x) * 10f64.powf(noise.sample(&mut rng)))
        .collect();

    Dataset::new(
        spec.nbf.clone(),
        time,
        format!("synthetic (seed {})", spec.seed),
    )
}
