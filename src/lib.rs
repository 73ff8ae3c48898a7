//! `alkane-scaling` library crate.
//!
//! Fits piecewise log-log power laws to basis-function-count vs. wall-time
//! benchmark data and renders the annotated figure.
//!
//! The binary (`alkfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the sample generator binary shares the same types and writers

pub mod app;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
