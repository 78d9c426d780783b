//! Fixed-width candidate tables.

use crate::domain::{BoundaryMode, CountPolicy, SearchOrder, SelectorConfig, TickCandidate};
use crate::scale::{ScaleError, TickCandidates};

/// Format the header and candidate table for one range.
///
/// The first acceptable candidate (the one a caller would pick) is marked `*`.
pub fn format_candidates(candidates: &TickCandidates) -> String {
    let range = candidates.range();
    let rows: Vec<TickCandidate> = candidates.restart().collect();
    let preferred = rows.iter().position(|c| c.acceptable);

    let mut out = String::new();
    out.push_str(&format!(
        "Range: [{}, {}] span={} magnitude={}\n",
        fmt_value(range.min()),
        fmt_value(range.max()),
        fmt_value(range.span()),
        candidates.magnitude(),
    ));
    out.push_str(&format_config(candidates.config()));
    out.push('\n');

    out.push_str(
        format!(
            "  {:>14} {:>16} {:>16} {:>6} {:<4}",
            "scale", "min_tick", "max_tick", "ticks", "ok"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("  {:-<14} {:-<16} {:-<16} {:-<6} {:-<4}", "", "", "", "", "").trim_end());
    out.push('\n');

    for (idx, c) in rows.iter().enumerate() {
        let marker = if Some(idx) == preferred { "*" } else { " " };
        out.push_str(
            format!(
                "{marker} {:>14} {:>16} {:>16} {:>6} {:<4}",
                fmt_value(c.tick_scale),
                fmt_value(c.min_tick_value),
                fmt_value(c.max_tick_value),
                c.tick_count,
                if c.acceptable { "yes" } else { "no" },
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if preferred.is_none() {
        out.push_str("(no candidate within bounds)\n");
    }

    out
}

/// One-line summary of selector settings.
pub fn format_config(config: &SelectorConfig) -> String {
    format!(
        "Bounds: {}..={} ticks | count={} | boundary={} | order={}\n",
        config.bounds.min_ticks(),
        config.bounds.max_ticks(),
        match config.count_policy {
            CountPolicy::Round => "round",
            CountPolicy::Truncate => "truncate",
        },
        match config.boundary {
            BoundaryMode::Snapped => "snapped",
            BoundaryMode::Raw => "raw",
        },
        match config.order {
            SearchOrder::FineFirst => "fine-first",
            SearchOrder::CoarseFirst => "coarse-first",
        },
    )
}

/// Format a failed range in the same layout as a table header.
pub fn format_range_error(min: f64, max: f64, err: &ScaleError) -> String {
    format!("Range: [{}, {}]\n  error: {err}\n", fmt_value(min), fmt_value(max))
}

/// Print a float with at most 10 decimals and no trailing zeros.
///
/// Hides representation noise such as `3.0000000000000004`.
pub fn fmt_value(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let s = format!("{v:.10}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::select_tick_scale;

    #[test]
    fn fmt_value_hides_float_noise() {
        assert_eq!(fmt_value(3.0000000000000004), "3");
        assert_eq!(fmt_value(0.30000000000000004), "0.3");
        assert_eq!(fmt_value(-400.0), "-400");
        assert_eq!(fmt_value(599.5), "599.5");
        assert_eq!(fmt_value(-0.00000000000001), "0");
    }

    #[test]
    fn table_marks_preferred_candidate() {
        let candidates = select_tick_scale(2.0, 30.0).unwrap();
        let table = format_candidates(&candidates);

        assert!(table.starts_with("Range: [2, 30] span=28 magnitude=1\n"));
        assert!(table.contains("Bounds: 4..=8 ticks | count=round | boundary=snapped | order=fine-first"));

        let marked: Vec<&str> = table.lines().filter(|l| l.starts_with('*')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains(" 5 "));
        assert!(marked[0].ends_with("yes"));
    }

    #[test]
    fn table_ignores_iterator_position() {
        let mut candidates = select_tick_scale(1.0, 3.0).unwrap();
        let full = format_candidates(&candidates);
        candidates.next();
        assert_eq!(format_candidates(&candidates), full);
    }

    #[test]
    fn range_error_line() {
        let err = select_tick_scale(600.0, 31.0).unwrap_err();
        let text = format_range_error(600.0, 31.0, &err);
        assert!(text.starts_with("Range: [600, 31]\n  error: invalid range"));
    }
}
