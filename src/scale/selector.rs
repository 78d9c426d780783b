//! Candidate enumeration and evaluation.
//!
//! For a range with magnitude `m = floor(log10(max - min))` the selector
//! yields six candidates, by default in this order:
//!
//! ```text
//! 1·10^(m-1), 2·10^(m-1), 5·10^(m-1), 1·10^m, 2·10^m, 5·10^m
//! ```
//!
//! Each candidate is evaluated independently:
//! - `max_tick = ceil(max / scale) * scale`
//! - `min_tick = floor(min / scale) * scale`
//! - `count    = whole((max_tick - min_tick) / scale) + 1`
//! - acceptable when `min_ticks <= count <= max_ticks`
//!
//! Nothing is printed here; the iterator is the whole output.

use std::iter::FusedIterator;

use crate::domain::{SelectorConfig, TickCandidate, ValueRange};
use crate::scale::{ScaleError, power_of_ten_scale, range_magnitude};

/// Number of candidates produced per range (2 magnitudes × 3 relative scales).
pub const CANDIDATE_COUNT: usize = 6;

/// Enumerate candidates for `[min_value, max_value]` using the default configuration.
pub fn select_tick_scale(min_value: f64, max_value: f64) -> Result<TickCandidates, ScaleError> {
    TickScaleSelector::default().select(min_value, max_value)
}

/// Configured tick-scale selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickScaleSelector {
    config: SelectorConfig,
}

impl TickScaleSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Validate the range and return a lazy iterator over its six candidates.
    pub fn select(&self, min_value: f64, max_value: f64) -> Result<TickCandidates, ScaleError> {
        let range = ValueRange::new(min_value, max_value)?;
        let span = range.span();
        let magnitude = range_magnitude(span, self.config.boundary)?;

        // Subnormal spans push 10^(m-1) to zero; spans near f64::MAX push the
        // coarser tick bounds past it.
        for candidate_magnitude in self.config.order.magnitudes(magnitude) {
            for relative_scale in self.config.order.relative_scales() {
                let candidate =
                    evaluate_candidate(&range, relative_scale, candidate_magnitude, &self.config);
                if !(candidate.tick_scale > 0.0
                    && candidate.min_tick_value.is_finite()
                    && candidate.max_tick_value.is_finite())
                {
                    return Err(ScaleError::DomainError { range: span });
                }
            }
        }

        log::debug!(
            "range [{min_value}, {max_value}] span={span} magnitude={magnitude} order={:?}",
            self.config.order
        );

        Ok(TickCandidates {
            range,
            magnitude,
            config: self.config,
            index: 0,
        })
    }
}

/// Evaluate one tick scale against a range.
pub fn evaluate_candidate(
    range: &ValueRange,
    relative_scale: u32,
    magnitude: i32,
    config: &SelectorConfig,
) -> TickCandidate {
    let tick_scale = power_of_ten_scale(relative_scale, magnitude);
    let max_tick_value = config.boundary.ceil(range.max() / tick_scale) * tick_scale;
    let min_tick_value = config.boundary.floor(range.min() / tick_scale) * tick_scale;
    let tick_count = config
        .count_policy
        .apply((max_tick_value - min_tick_value) / tick_scale)
        .saturating_add(1);

    TickCandidate {
        tick_scale,
        relative_scale,
        magnitude,
        min_tick_value,
        max_tick_value,
        tick_count,
        acceptable: config.bounds.contains(tick_count),
    }
}

/// Lazy, finite, restartable sequence of the six candidates for one range.
///
/// Cloning captures the current position, so `preferred()` and `restart()`
/// never disturb an in-progress iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct TickCandidates {
    range: ValueRange,
    magnitude: i32,
    config: SelectorConfig,
    index: usize,
}

impl TickCandidates {
    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    /// `floor(log10(max - min))` as computed for this range.
    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// A fresh iterator positioned at the first candidate.
    pub fn restart(&self) -> Self {
        Self {
            index: 0,
            ..self.clone()
        }
    }

    /// First acceptable candidate in priority order, if any.
    pub fn preferred(&self) -> Option<TickCandidate> {
        self.restart().find(|c| c.acceptable)
    }

    fn candidate_at(&self, index: usize) -> TickCandidate {
        let magnitudes = self.config.order.magnitudes(self.magnitude);
        let relative_scales = self.config.order.relative_scales();
        let magnitude = magnitudes[index / relative_scales.len()];
        let relative_scale = relative_scales[index % relative_scales.len()];
        evaluate_candidate(&self.range, relative_scale, magnitude, &self.config)
    }
}

impl Iterator for TickCandidates {
    type Item = TickCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= CANDIDATE_COUNT {
            return None;
        }
        let candidate = self.candidate_at(self.index);
        self.index += 1;
        log::trace!(
            "scale={} min_tick={} max_tick={} count={} acceptable={}",
            candidate.tick_scale,
            candidate.min_tick_value,
            candidate.max_tick_value,
            candidate.tick_count,
            candidate.acceptable
        );
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CANDIDATE_COUNT.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TickCandidates {}

impl FusedIterator for TickCandidates {}
