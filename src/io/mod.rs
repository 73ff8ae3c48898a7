//! Input/output helpers.
//!
//! - workbook/CSV ingest (`ingest`)
//! - fit result export as JSON (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
