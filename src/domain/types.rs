//! Shared domain types.
//!
//! These types are intentionally small and serializable so they can be:
//!
//! - produced lazily by the selector
//! - printed as terminal tables
//! - exported to JSON/CSV

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::scale::ScaleError;

/// Relative tolerance used when snapping a float to a nearby integer.
pub const SNAP_TOLERANCE: f64 = 1e-12;

/// Default lower bound on an acceptable tick count.
pub const DEFAULT_MIN_TICKS: usize = 4;

/// Default upper bound on an acceptable tick count.
pub const DEFAULT_MAX_TICKS: usize = 8;

/// A validated value range with `max > min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Build a range, rejecting `max <= min` (and NaN bounds).
    pub fn new(min: f64, max: f64) -> Result<Self, ScaleError> {
        if min.is_nan() || max.is_nan() || max <= min {
            return Err(ScaleError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`. Positive by construction, but may overflow to infinity.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// One evaluated tick scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickCandidate {
    /// Spacing between adjacent ticks (`relative_scale * 10^magnitude`).
    pub tick_scale: f64,
    pub relative_scale: u32,
    pub magnitude: i32,
    pub min_tick_value: f64,
    pub max_tick_value: f64,
    /// Number of ticks from `min_tick_value` to `max_tick_value` inclusive.
    pub tick_count: usize,
    /// Whether `tick_count` lies within the configured bounds.
    pub acceptable: bool,
}

/// Inclusive bounds on an acceptable tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickBounds {
    min_ticks: usize,
    max_ticks: usize,
}

impl TickBounds {
    pub fn new(min_ticks: usize, max_ticks: usize) -> Result<Self, ScaleError> {
        if min_ticks == 0 || min_ticks > max_ticks {
            return Err(ScaleError::InvalidTickBounds { min_ticks, max_ticks });
        }
        Ok(Self { min_ticks, max_ticks })
    }

    pub fn min_ticks(&self) -> usize {
        self.min_ticks
    }

    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    pub fn contains(&self, tick_count: usize) -> bool {
        tick_count >= self.min_ticks && tick_count <= self.max_ticks
    }
}

impl Default for TickBounds {
    fn default() -> Self {
        Self {
            min_ticks: DEFAULT_MIN_TICKS,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

/// How the fractional tick span is converted to an integer count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CountPolicy {
    /// Round to the nearest integer.
    #[default]
    Round,
    /// Truncate toward zero (an `as` integer conversion).
    Truncate,
}

impl CountPolicy {
    /// Convert a non-negative span (in ticks) to a whole number.
    pub fn apply(self, span: f64) -> usize {
        let span = span.max(0.0);
        match self {
            CountPolicy::Round => span.round() as usize,
            CountPolicy::Truncate => span as usize,
        }
    }
}

/// How `floor`/`ceil` treat values that sit a rounding error away from an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Snap to the nearest integer first when within `SNAP_TOLERANCE` (relative).
    ///
    /// `log10(1000)` and `0.3 / 0.1` then land on 3 rather than one side of it.
    #[default]
    Snapped,
    /// Apply `floor`/`ceil` to the raw float.
    Raw,
}

impl BoundaryMode {
    pub fn floor(self, value: f64) -> f64 {
        self.prepare(value).floor()
    }

    pub fn ceil(self, value: f64) -> f64 {
        self.prepare(value).ceil()
    }

    fn prepare(self, value: f64) -> f64 {
        match self {
            BoundaryMode::Snapped => snap_to_integer(value),
            BoundaryMode::Raw => value,
        }
    }
}

/// Return the nearest integer if `value` is within `SNAP_TOLERANCE` of it (relative), else `value`.
pub fn snap_to_integer(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= SNAP_TOLERANCE * nearest.abs().max(1.0) {
        nearest
    } else {
        value
    }
}

/// Iteration order over candidate magnitudes and relative scales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SearchOrder {
    /// Magnitudes `[m-1, m]`, relative scales `[1, 2, 5]`.
    #[default]
    FineFirst,
    /// Magnitudes `[m, m-1]`, relative scales `[5, 2, 1]`.
    CoarseFirst,
}

impl SearchOrder {
    pub fn magnitudes(self, range_magnitude: i32) -> [i32; 2] {
        match self {
            SearchOrder::FineFirst => [range_magnitude - 1, range_magnitude],
            SearchOrder::CoarseFirst => [range_magnitude, range_magnitude - 1],
        }
    }

    pub fn relative_scales(self) -> [u32; 3] {
        match self {
            SearchOrder::FineFirst => [1, 2, 5],
            SearchOrder::CoarseFirst => [5, 2, 1],
        }
    }
}

/// Full selector configuration.
///
/// `Default` gives bounds 4..=8, rounded counts, snapped boundaries, fine-first order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub bounds: TickBounds,
    pub count_policy: CountPolicy,
    pub boundary: BoundaryMode,
    pub order: SearchOrder,
}

/// Output format for `tstool scale` / `tstool survey`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// A marker batch as understood by the generator.
///
/// Derived from CLI flags plus environment defaults.
#[derive(Debug, Clone)]
pub struct MarkerConfig {
    pub template_path: PathBuf,
    pub out_dir: PathBuf,
    pub labels: RangeInclusive<u32>,
    pub token: String,
    pub font_fix: bool,
    pub file_prefix: String,
    pub keep_svg: bool,
    pub jobs: usize,

    pub rasterizer: String,
    pub density: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_rejects_inverted_and_nan() {
        assert!(ValueRange::new(600.0, 31.0).is_err());
        assert!(ValueRange::new(5.0, 5.0).is_err());
        assert!(ValueRange::new(f64::NAN, 1.0).is_err());
        let r = ValueRange::new(-400.0, 599.5).unwrap();
        assert_eq!(r.span(), 999.5);
    }

    #[test]
    fn tick_bounds_validation() {
        assert!(TickBounds::new(0, 8).is_err());
        assert!(TickBounds::new(9, 8).is_err());
        let b = TickBounds::new(4, 8).unwrap();
        assert!(b.contains(4) && b.contains(8));
        assert!(!b.contains(3) && !b.contains(9));
    }

    #[test]
    fn count_policy_round_vs_truncate() {
        assert_eq!(CountPolicy::Round.apply(19.999999999999996), 20);
        assert_eq!(CountPolicy::Truncate.apply(19.999999999999996), 19);
        assert_eq!(CountPolicy::Truncate.apply(2.0), 2);
    }

    #[test]
    fn snapping_only_near_integers() {
        assert_eq!(snap_to_integer(2.9999999999999996), 3.0);
        assert_eq!(snap_to_integer(2.9998), 2.9998);
        assert_eq!(BoundaryMode::Snapped.floor(0.3 / 0.1), 3.0);
        assert_eq!(BoundaryMode::Raw.floor(0.3 / 0.1), 2.0);
    }
}
