//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the benchmark observations (`Dataset`, `LogDataset`)
//! - segment boundaries (`SegmentSpec`, `Segment`)
//! - fit outputs (`FitResult`, `SegmentFit`)
//! - run configuration (`RunConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
