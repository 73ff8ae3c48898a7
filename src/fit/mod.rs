//! Piecewise fitting.
//!
//! Responsibilities:
//!
//! - resolve segment boundaries against the dataset length
//! - fit each segment in log-log space and rebuild its curve

pub mod fitter;
pub mod segments;

pub use fitter::*;
pub use segments::*;
