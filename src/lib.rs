//! `trackscribe-tools` library crate.
//!
//! The binary (`tstool`) is a thin wrapper around this library so that:
//!
//! - the tick-scale search is testable as a pure function
//! - the marker batch can be driven with a fake rasterizer in tests
//! - printing and exporting stay layered on top of the computations

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod markers;
pub mod report;
pub mod scale;

pub use scale::{ScaleError, TickCandidates, TickScaleSelector, select_tick_scale};
