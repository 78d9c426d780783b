//! Command-line parsing for `tstool`.
//!
//! Argument parsing and command dispatch stay separate from the selector and
//! the marker generator.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{BoundaryMode, CountPolicy, DEFAULT_MAX_TICKS, DEFAULT_MIN_TICKS, OutputFormat, SearchOrder};
use crate::markers::job::DEFAULT_PREFIX;
use crate::markers::rasterizer::DEFAULT_DENSITY;
use crate::markers::template::DEFAULT_TOKEN;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tstool", version, about = "Axis tick-scale search and numbered marker generation")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` applies otherwise.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enumerate the six candidate tick scales for one range.
    Scale(ScaleArgs),
    /// Run the selector over a fixed list of sample ranges.
    Survey(SurveyArgs),
    /// Render numbered marker PNGs from a template SVG.
    Markers(MarkerArgs),
}

/// Selector and output options shared by `scale` and `survey`.
#[derive(Debug, Args, Clone)]
pub struct SelectorArgs {
    /// Smallest acceptable tick count.
    #[arg(long, default_value_t = DEFAULT_MIN_TICKS)]
    pub min_ticks: usize,

    /// Largest acceptable tick count.
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    pub max_ticks: usize,

    /// How fractional tick spans become counts.
    #[arg(long = "count", value_enum, default_value_t = CountPolicy::Round)]
    pub count_policy: CountPolicy,

    /// Snap near-integer values before floor/ceil, or use raw floats.
    #[arg(long, value_enum, default_value_t = BoundaryMode::Snapped)]
    pub boundary: BoundaryMode,

    /// Candidate priority order.
    #[arg(long, value_enum, default_value_t = SearchOrder::FineFirst)]
    pub order: SearchOrder,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also write the candidates to a file (`.csv` for CSV, JSON otherwise).
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

/// Options for `tstool scale`.
#[derive(Debug, Args, Clone)]
pub struct ScaleArgs {
    /// Lower end of the value range.
    #[arg(allow_negative_numbers = true)]
    pub min: f64,

    /// Upper end of the value range (must be greater than MIN).
    #[arg(allow_negative_numbers = true)]
    pub max: f64,

    #[command(flatten)]
    pub selector: SelectorArgs,
}

/// Options for `tstool survey`.
#[derive(Debug, Args, Clone)]
pub struct SurveyArgs {
    #[command(flatten)]
    pub selector: SelectorArgs,
}

/// Options for `tstool markers`.
#[derive(Debug, Args, Clone)]
pub struct MarkerArgs {
    /// Template SVG containing the placeholder label.
    #[arg(long, value_name = "SVG")]
    pub template: PathBuf,

    /// Directory receiving the PNGs (created if missing).
    #[arg(long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// First label.
    #[arg(long, default_value_t = 0)]
    pub start: u32,

    /// Last label (inclusive).
    #[arg(long, default_value_t = 99)]
    pub end: u32,

    /// Placeholder text. A bracketed token like `>99<` becomes `>N<`; any other becomes `N`.
    #[arg(long, default_value = DEFAULT_TOKEN)]
    pub token: String,

    /// Keep the template's exported font attribute as-is.
    #[arg(long)]
    pub no_font_fix: bool,

    /// Output file prefix.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Rasterization density (DPI).
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    pub density: u32,

    /// Rasterizer program (default: `TSTOOL_RASTERIZER`, else `convert`).
    #[arg(long, value_name = "PROGRAM")]
    pub rasterizer: Option<String>,

    /// Parallel rasterizer processes (default: `TSTOOL_JOBS`, else available cores).
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Leave the per-label staging SVGs next to the PNGs.
    #[arg(long)]
    pub keep_svg: bool,
}
