use thiserror::Error;

/// Precondition failures of the tick-scale selector.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScaleError {
    /// `max <= min`, or either bound is NaN.
    #[error("invalid range: max ({max}) must be greater than min ({min})")]
    InvalidRange { min: f64, max: f64 },

    /// The range has no usable base-10 magnitude (overflowed, subnormal, or non-positive).
    #[error("range {range} is outside the domain of log10-based tick scales")]
    DomainError { range: f64 },

    #[error("invalid tick bounds: need 1 <= min_ticks ({min_ticks}) <= max_ticks ({max_ticks})")]
    InvalidTickBounds { min_ticks: usize, max_ticks: usize },
}
