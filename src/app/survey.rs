//! Sample-range survey.
//!
//! A fixed list of ranges covering the interesting cases: tiny ranges,
//! powers of ten, negative minimums, fractional bounds, and an inverted range.
//! Used by `tstool survey` and as regression fixtures.

use crate::scale::{ScaleError, TickCandidates, TickScaleSelector};

/// `(min, max)` pairs, in presentation order. The last one is deliberately inverted.
pub const SAMPLE_RANGES: [(f64, f64); 11] = [
    (2.0, 30.0),
    (1.0, 3.0),
    (0.3, 10.0),
    (5.0, 600.0),
    (7.0, 58.0),
    (531.0, 600.0),
    (-531.0, 600.0),
    (-400.0, 600.0),
    (-400.0, 599.5),
    (-0.3, 600.0),
    (600.0, 31.0),
];

/// Outcome of one surveyed range.
#[derive(Debug, Clone)]
pub struct SurveyEntry {
    pub min: f64,
    pub max: f64,
    pub outcome: Result<TickCandidates, ScaleError>,
}

/// Run the selector over each range. Failures are kept per entry, not propagated.
pub fn run_survey(selector: &TickScaleSelector, ranges: &[(f64, f64)]) -> Vec<SurveyEntry> {
    ranges
        .iter()
        .map(|&(min, max)| {
            let outcome = selector.select(min, max);
            if let Err(err) = &outcome {
                log::warn!("survey range [{min}, {max}] rejected: {err}");
            }
            SurveyEntry { min, max, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_sample_has_an_acceptable_candidate() {
        let entries = run_survey(&TickScaleSelector::default(), &SAMPLE_RANGES);
        assert_eq!(entries.len(), SAMPLE_RANGES.len());

        let (ok, failed): (Vec<_>, Vec<_>) = entries.iter().partition(|e| e.outcome.is_ok());
        assert_eq!(ok.len(), 10);
        assert_eq!(failed.len(), 1);
        assert_eq!((failed[0].min, failed[0].max), (600.0, 31.0));

        for entry in ok {
            let candidates = entry.outcome.as_ref().unwrap();
            assert_eq!(candidates.len(), 6);
            assert!(
                candidates.preferred().is_some(),
                "no acceptable scale for [{}, {}]",
                entry.min,
                entry.max
            );
        }
    }

    #[test]
    fn preferred_scales_for_samples() {
        let preferred: Vec<f64> = run_survey(&TickScaleSelector::default(), &SAMPLE_RANGES[..10])
            .into_iter()
            .map(|e| e.outcome.unwrap().preferred().unwrap().tick_scale)
            .collect();
        assert_eq!(preferred, vec![5.0, 0.5, 2.0, 100.0, 10.0, 10.0, 200.0, 200.0, 200.0, 100.0]);
    }
}
