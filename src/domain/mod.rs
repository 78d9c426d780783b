//! Domain types shared by the selector, the reports, and the exports.
//!
//! This module defines:
//!
//! - the validated input range (`ValueRange`)
//! - per-candidate evaluation records (`TickCandidate`)
//! - selector policies (`CountPolicy`, `BoundaryMode`, `SearchOrder`) and `SelectorConfig`
//! - the marker batch configuration (`MarkerConfig`)

pub mod types;

pub use types::*;
