//! Reporting: terminal summary and the text shared with the figure.

pub mod format;

pub use format::*;
