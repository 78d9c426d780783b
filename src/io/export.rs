//! Export candidate tables to JSON or CSV.
//!
//! Exports are meant for spreadsheets or downstream scripts that want to pick
//! a tick scale themselves.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::{SelectorConfig, TickCandidate};
use crate::error::AppError;
use crate::scale::TickCandidates;

/// Serializable snapshot of one range's candidates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateReport {
    pub min_value: f64,
    pub max_value: f64,
    pub span: f64,
    pub magnitude: i32,
    pub config: SelectorConfig,
    /// First acceptable candidate, if any.
    pub preferred: Option<TickCandidate>,
    pub candidates: Vec<TickCandidate>,
}

impl CandidateReport {
    pub fn from_candidates(candidates: &TickCandidates) -> Self {
        let range = candidates.range();
        let rows: Vec<TickCandidate> = candidates.restart().collect();
        Self {
            min_value: range.min(),
            max_value: range.max(),
            span: range.span(),
            magnitude: candidates.magnitude(),
            config: *candidates.config(),
            preferred: rows.iter().copied().find(|c| c.acceptable),
            candidates: rows,
        }
    }
}

const CSV_HEADER: &str =
    "min_value,max_value,range_magnitude,tick_scale,relative_scale,magnitude,min_tick_value,max_tick_value,tick_count,acceptable,preferred";

/// Render reports as a pretty JSON array.
pub fn candidates_to_json(reports: &[CandidateReport]) -> Result<String, AppError> {
    serde_json::to_string_pretty(reports)
        .map_err(|e| AppError::new(4, format!("Failed to serialize candidates: {e}")))
}

/// Render reports as CSV (one row per candidate).
pub fn candidates_to_csv(reports: &[CandidateReport]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for report in reports {
        for c in &report.candidates {
            let preferred = report.preferred.as_ref() == Some(c);
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                report.min_value,
                report.max_value,
                report.magnitude,
                c.tick_scale,
                c.relative_scale,
                c.magnitude,
                c.min_tick_value,
                c.max_tick_value,
                c.tick_count,
                c.acceptable,
                preferred,
            ));
        }
    }
    out
}

/// Write reports to a JSON file.
pub fn write_candidates_json(path: &Path, reports: &[CandidateReport]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), reports)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

/// Write reports to a CSV file.
pub fn write_candidates_csv(path: &Path, reports: &[CandidateReport]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    file.write_all(candidates_to_csv(reports).as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    Ok(())
}

/// Write reports to `path`, choosing CSV for a `.csv` extension and JSON otherwise.
pub fn write_candidates(path: &Path, reports: &[CandidateReport]) -> Result<(), AppError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        write_candidates_csv(path, reports)
    } else {
        write_candidates_json(path, reports)
    }
}
