//! Tick-scale selection.
//!
//! Given a value range, the selector proposes six "nice" tick spacings
//! (`1`, `2`, `5` times a power of ten, at the range's magnitude and one below)
//! and evaluates each one. Callers pick among the acceptable candidates;
//! earlier candidates have higher priority.

pub mod error;
pub mod magnitude;
pub mod selector;

pub use error::ScaleError;
pub use magnitude::{power_of_ten_scale, range_magnitude};
pub use selector::{CANDIDATE_COUNT, TickCandidates, TickScaleSelector, evaluate_candidate, select_tick_scale};
