//! Base-10 magnitude helpers.
//!
//! `floor(log10(range))` is where floating-point error bites: `log10` of a
//! value a few ulps below a power of ten lands just under an integer. With
//! `BoundaryMode::Snapped` the logarithm is snapped to the nearest integer
//! (relative tolerance `1e-12`) before flooring.

use crate::domain::BoundaryMode;
use crate::scale::ScaleError;

/// `floor(log10(span))` under the given boundary mode.
pub fn range_magnitude(span: f64, boundary: BoundaryMode) -> Result<i32, ScaleError> {
    if !(span.is_finite() && span > 0.0) {
        return Err(ScaleError::DomainError { range: span });
    }
    let magnitude = boundary.floor(span.log10());
    if !magnitude.is_finite() {
        return Err(ScaleError::DomainError { range: span });
    }
    Ok(magnitude as i32)
}

/// `relative_scale * 10^magnitude`.
///
/// Negative magnitudes divide instead of multiplying by `10^-n`, so `0.1`,
/// `0.2`, `0.5` come out as the nearest doubles. Below `10^-308` the divisor
/// itself would overflow, so the division is split and the result goes
/// subnormal (or zero past about `10^-324`).
pub fn power_of_ten_scale(relative_scale: u32, magnitude: i32) -> f64 {
    let relative = f64::from(relative_scale);
    if magnitude >= 0 {
        relative * 10f64.powi(magnitude)
    } else if magnitude >= -MAX_DECIMAL_EXP {
        relative / 10f64.powi(-magnitude)
    } else {
        relative / 10f64.powi(MAX_DECIMAL_EXP) / 10f64.powi(-magnitude - MAX_DECIMAL_EXP)
    }
}

/// Largest `n` with `10^n` finite.
const MAX_DECIMAL_EXP: i32 = f64::MAX_10_EXP;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_of_common_ranges() {
        let m = |span| range_magnitude(span, BoundaryMode::Snapped).unwrap();
        assert_eq!(m(28.0), 1);
        assert_eq!(m(2.0), 0);
        assert_eq!(m(9.7), 0);
        assert_eq!(m(999.5), 2);
        assert_eq!(m(1000.0), 3);
        assert_eq!(m(30.0), 1);
        assert_eq!(m(600.3), 2);
        assert_eq!(m(0.001), -3);
        assert_eq!(m(0.05), -2);
    }

    #[test]
    fn magnitude_snaps_just_below_power_of_ten() {
        let span = 1000.0 * (1.0 - 1e-13);
        assert_eq!(range_magnitude(span, BoundaryMode::Snapped).unwrap(), 3);
        assert_eq!(range_magnitude(span, BoundaryMode::Raw).unwrap(), 2);
    }

    #[test]
    fn magnitude_rejects_non_positive_and_infinite() {
        assert!(range_magnitude(0.0, BoundaryMode::Snapped).is_err());
        assert!(range_magnitude(-1.0, BoundaryMode::Snapped).is_err());
        assert!(range_magnitude(f64::INFINITY, BoundaryMode::Raw).is_err());
        assert!(range_magnitude(f64::NAN, BoundaryMode::Raw).is_err());
    }

    #[test]
    fn power_of_ten_scale_is_exact_for_small_steps() {
        assert_eq!(power_of_ten_scale(1, -1), 0.1);
        assert_eq!(power_of_ten_scale(2, -1), 0.2);
        assert_eq!(power_of_ten_scale(5, -2), 0.05);
        assert_eq!(power_of_ten_scale(5, 0), 5.0);
        assert_eq!(power_of_ten_scale(2, 3), 2000.0);
    }

    #[test]
    fn power_of_ten_scale_reaches_below_the_normal_range() {
        let tiny = power_of_ten_scale(1, -309);
        assert!(tiny > 0.0 && tiny < f64::MIN_POSITIVE);
        assert!((tiny / 1e-309 - 1.0).abs() < 1e-9);
        assert!(power_of_ten_scale(5, -308) > 0.0);
        assert_eq!(power_of_ten_scale(1, -330), 0.0);
    }
}
