//! Built-in data sources.

pub mod synthetic;

pub use synthetic::{REFERENCE_NBF, SyntheticSpec, generate_dataset};
