//! Input/output helpers.
//!
//! - candidate exports (JSON/CSV) (`export`)

pub mod export;

pub use export::*;
