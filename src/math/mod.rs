//! Mathematical utilities: log transform and simple linear regression.

pub mod ols;
pub mod transform;

pub use ols::*;
pub use transform::*;
